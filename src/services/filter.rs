use crate::models::{AudioFeatures, Track};
use std::collections::HashMap;

/// Keeps the tracks whose energy is at or below the threshold, in the same
/// order they arrived. Tracks with no feature reading are dropped; the
/// aggregator records those as per-track fetch failures.
pub fn select_by_energy(
    tracks: &[Track],
    features_by_track: &HashMap<String, AudioFeatures>,
    threshold: f64,
) -> Vec<Track> {
    tracks
        .iter()
        .filter(|track| {
            features_by_track
                .get(&track.id)
                .map(|features| features.energy <= threshold)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: format!("Track {}", id),
            artists: vec!["Artist".to_string()],
        }
    }

    fn features(pairs: &[(&str, f64)]) -> HashMap<String, AudioFeatures> {
        pairs
            .iter()
            .map(|(id, energy)| {
                (
                    id.to_string(),
                    AudioFeatures {
                        track_id: id.to_string(),
                        energy: *energy,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn keeps_low_energy_tracks_in_playlist_order() {
        let tracks = vec![track("a"), track("b"), track("c"), track("d")];
        let features = features(&[("a", 0.9), ("b", 0.2), ("c", 0.7), ("d", 0.1)]);

        let selected = select_by_energy(&tracks, &features, 0.5);
        let ids: Vec<&str> = selected.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d"]);
    }

    #[test]
    fn threshold_comparison_is_inclusive() {
        let tracks = vec![track("edge")];
        let features = features(&[("edge", 0.5)]);

        let selected = select_by_energy(&tracks, &features, 0.5);
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn filtering_is_idempotent() {
        let tracks = vec![track("a"), track("b"), track("c")];
        let features = features(&[("a", 0.3), ("b", 0.8), ("c", 0.5)]);

        let once = select_by_energy(&tracks, &features, 0.5);
        let twice = select_by_energy(&once, &features, 0.5);
        assert_eq!(once, twice);
    }

    #[test]
    fn tracks_without_features_are_dropped() {
        let tracks = vec![track("known"), track("unknown")];
        let features = features(&[("known", 0.1)]);

        let selected = select_by_energy(&tracks, &features, 0.5);
        let ids: Vec<&str> = selected.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["known"]);
    }

    #[test]
    fn empty_input_selects_nothing() {
        let selected = select_by_energy(&[], &HashMap::new(), 0.5);
        assert!(selected.is_empty());
    }
}
