//! The four entrants and their randomly assigned motion profiles.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::constants::PARTICIPANT_COUNT;
use crate::motion::{shuffled_profiles, MotionProfile};
use crate::participant::{Participant, ParticipantId};

/// Fixed roster: name and RGB color per lane.
const ROSTER: [(&str, (u8, u8, u8)); PARTICIPANT_COUNT] = [
    ("Yellow", (241, 196, 15)),
    ("White", (236, 240, 241)),
    ("Red", (231, 76, 60)),
    ("Blue", (52, 152, 219)),
];

/// One lane of the starting grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Entrant {
    pub id: ParticipantId,
    pub name: &'static str,
    pub color: (u8, u8, u8),
    pub profile: MotionProfile,
}

/// The starting grid: four entrants, each with a distinct profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lineup {
    entrants: [Entrant; PARTICIPANT_COUNT],
    seed: Option<u64>,
}

impl Lineup {
    /// Shuffle the profiles onto the roster.
    ///
    /// The same seed always yields the same assignment; `None` draws from OS
    /// entropy.
    #[must_use]
    pub fn assign(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_profiles(shuffled_profiles(&mut rng), seed)
    }

    /// Build a lineup from an explicit assignment, lane by lane.
    #[must_use]
    pub fn with_profiles(profiles: [MotionProfile; PARTICIPANT_COUNT], seed: Option<u64>) -> Self {
        let mut lane = 0u32;
        let entrants = ROSTER.map(|(name, color)| {
            let id = ParticipantId(lane);
            let profile = profiles[lane as usize];
            lane += 1;
            Entrant {
                id,
                name,
                color,
                profile,
            }
        });
        Self { entrants, seed }
    }

    #[must_use]
    pub fn entrants(&self) -> &[Entrant; PARTICIPANT_COUNT] {
        &self.entrants
    }

    /// Seed the assignment was drawn from, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Look up an entrant by id.
    #[must_use]
    pub fn get(&self, id: ParticipantId) -> Option<&Entrant> {
        self.entrants.iter().find(|e| e.id == id)
    }

    /// Fresh participants at the start line, one per entrant.
    #[must_use]
    pub fn participants(&self, snap_on_saturation: bool) -> Vec<Participant> {
        self.entrants
            .iter()
            .map(|e| Participant::new(e.id, e.profile).with_snap_on_saturation(snap_on_saturation))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_names_and_ids() {
        let lineup = Lineup::assign(Some(1));
        let names: Vec<_> = lineup.entrants().iter().map(|e| e.name).collect();
        assert_eq!(names, ["Yellow", "White", "Red", "Blue"]);
        for (i, e) in lineup.entrants().iter().enumerate() {
            assert_eq!(e.id, ParticipantId(u32::try_from(i).unwrap()));
        }
    }

    #[test]
    fn profiles_are_a_permutation() {
        for seed in 0..32 {
            let lineup = Lineup::assign(Some(seed));
            for profile in MotionProfile::ALL {
                let count = lineup
                    .entrants()
                    .iter()
                    .filter(|e| e.profile == profile)
                    .count();
                assert_eq!(count, 1, "seed {seed}");
            }
        }
    }

    #[test]
    fn seed_reproduces_assignment() {
        assert_eq!(Lineup::assign(Some(99)), Lineup::assign(Some(99)));
        assert_eq!(Lineup::assign(Some(99)).seed(), Some(99));
    }

    #[test]
    fn unseeded_lineup_is_still_valid() {
        let lineup = Lineup::assign(None);
        assert_eq!(lineup.seed(), None);
        assert_eq!(lineup.entrants().len(), PARTICIPANT_COUNT);
    }

    #[test]
    fn explicit_profiles_are_kept_in_order() {
        let lineup = Lineup::with_profiles(MotionProfile::ALL, None);
        assert_eq!(lineup.get(ParticipantId(2)).unwrap().profile, MotionProfile::EaseInOutBack);
        assert!(lineup.get(ParticipantId(9)).is_none());
    }

    #[test]
    fn participants_match_entrants() {
        let lineup = Lineup::assign(Some(3));
        let participants = lineup.participants(false);
        assert_eq!(participants.len(), PARTICIPANT_COUNT);
        for (p, e) in participants.iter().zip(lineup.entrants()) {
            assert_eq!(p.id(), e.id);
            assert_eq!(p.profile(), e.profile);
            assert_eq!(p.progress(), 0.0);
        }
    }
}
