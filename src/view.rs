//! Overlay queries for the waveform view
//!
//! Small read-only helpers over canonical events: layer rows, the layer filter
//! panel, cursor highlighting, and visible-window culling.

use crate::config::IngestConfig;
use crate::records::event::{EventPoint, Layer};

/// Events drawn in the row of `layer`
///
/// Role-bearing events appear once per precision tier they belong to, so the
/// same event may be returned for several layers.
pub fn events_for_layer<'a>(events: &'a [EventPoint], layer: &Layer) -> Vec<&'a EventPoint> {
    events.iter().filter(|e| e.belongs_to(layer)).collect()
}

/// Distinct layers in first-seen order
///
/// Precision tiers reached only through roles are included, so a tier row
/// with role members but no primary events still shows up in the filter.
pub fn layers_present(events: &[EventPoint]) -> Vec<Layer> {
    let mut layers: Vec<Layer> = Vec::new();
    let mut push = |layer: Layer| {
        if !layers.contains(&layer) {
            layers.push(layer);
        }
    };
    for event in events {
        push(event.layer.clone());
        if let Some(roles) = &event.roles {
            for tier in roles.tiers() {
                push(Layer::Precision(tier));
            }
        }
    }
    layers
}

/// True while the play cursor is near `event_time`
///
/// The highlight window opens `activate_before_sec` before the event and
/// closes `activate_after_sec` after it (both ends inclusive).
pub fn is_active(event_time: f64, cursor: f64, config: &IngestConfig) -> bool {
    cursor >= event_time - config.activate_before_sec
        && cursor <= event_time + config.activate_after_sec
}

/// Events inside the visible window `[start, end]`
pub fn events_in_window(events: &[EventPoint], start: f64, end: f64) -> Vec<&EventPoint> {
    events
        .iter()
        .filter(|e| e.time >= start && e.time <= end)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::event::{PrecisionTier, Roles, StrengthTier};

    fn point(time: f64, layer: Layer, roles: Option<Roles>) -> EventPoint {
        EventPoint {
            time,
            strength: 0.5,
            texture: None,
            color: "#5a9fd4".to_string(),
            layer,
            roles,
        }
    }

    fn roles(p0: &[&str], p1: &[&str], p2: &[&str]) -> Roles {
        fn owned(bands: &[&str]) -> Vec<String> {
            bands.iter().map(|b| b.to_string()).collect()
        }
        Roles {
            p0: owned(p0),
            p1: owned(p1),
            p2: owned(p2),
        }
    }

    #[test]
    fn test_events_for_layer_multi_membership() {
        let events = vec![
            point(0.0, Layer::Precision(PrecisionTier::P2), Some(roles(&["low"], &[], &["high"]))),
            point(1.0, Layer::Precision(PrecisionTier::P1), Some(roles(&["low"], &["mid"], &[]))),
        ];
        assert_eq!(events_for_layer(&events, &Layer::Precision(PrecisionTier::P0)).len(), 2);
        assert_eq!(events_for_layer(&events, &Layer::Precision(PrecisionTier::P1)).len(), 1);
        assert_eq!(events_for_layer(&events, &Layer::Precision(PrecisionTier::P2)).len(), 1);
    }

    #[test]
    fn test_events_for_layer_plain() {
        let events = vec![
            point(0.0, Layer::Strength(StrengthTier::Strong), None),
            point(1.0, Layer::Strength(StrengthTier::Weak), None),
            point(2.0, Layer::Strength(StrengthTier::Strong), None),
        ];
        let strong = events_for_layer(&events, &Layer::Strength(StrengthTier::Strong));
        assert_eq!(strong.iter().map(|e| e.time).collect::<Vec<_>>(), vec![0.0, 2.0]);
    }

    #[test]
    fn test_layers_present_first_seen() {
        let events = vec![
            point(0.0, Layer::Strength(StrengthTier::Medium), None),
            point(1.0, Layer::Custom("ghost".to_string()), None),
            point(2.0, Layer::Strength(StrengthTier::Medium), None),
            point(3.0, Layer::Precision(PrecisionTier::P2), Some(roles(&["low"], &[], &["hat"]))),
        ];
        assert_eq!(
            layers_present(&events),
            vec![
                Layer::Strength(StrengthTier::Medium),
                Layer::Custom("ghost".to_string()),
                Layer::Precision(PrecisionTier::P2),
                Layer::Precision(PrecisionTier::P0),
            ]
        );
    }

    #[test]
    fn test_is_active_window() {
        let config = IngestConfig::default();
        assert!(is_active(1.0, 0.98, &config));
        assert!(is_active(1.0, 1.0, &config));
        assert!(is_active(1.0, 1.1, &config));
        assert!(!is_active(1.0, 0.9, &config));
        assert!(!is_active(1.0, 1.2, &config));
    }

    #[test]
    fn test_events_in_window() {
        let events: Vec<EventPoint> = (0..10)
            .map(|i| point(i as f64, Layer::Strength(StrengthTier::Weak), None))
            .collect();
        let visible = events_in_window(&events, 2.0, 4.5);
        assert_eq!(visible.len(), 3);
        assert_eq!(visible[0].time, 2.0);
    }
}
