//! Memory-matching game state.
//!
//! The deck holds two cards per item. A player flips cards one at a time; two
//! face-up cards with the same item are matched, otherwise they stay face up
//! until the next flip hides them again.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::model::{GameItem, GameKind, NewGameResult};
use crate::error::{CaseloadError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Hidden,
    FaceUp,
    Matched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Item id shared by the two cards of a pair.
    pub pair_id: String,
    pub label: String,
    pub image_url: Option<String>,
    pub state: CardState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlipOutcome {
    /// First card of an attempt is now face up.
    Revealed,
    Matched { pair_id: String },
    Mismatched,
    /// The last pair was matched.
    Completed,
    /// The flip was not allowed (out of range, already face up or matched).
    Ignored,
}

#[derive(Debug, Clone)]
pub struct MemoryMatch {
    cards: Vec<Card>,
    face_up: Vec<usize>,
    attempts: u32,
    matched_pairs: u32,
}

impl MemoryMatch {
    /// Builds a shuffled deck from the first `pairs` items.
    ///
    /// The same items, pair count and seed always produce the same layout.
    pub fn new(items: &[GameItem], pairs: usize, seed: u64) -> Result<Self> {
        if pairs == 0 {
            return Err(CaseloadError::validation("a game needs at least one pair"));
        }
        if items.len() < pairs {
            return Err(CaseloadError::validation(format!(
                "{} pairs requested but only {} items available",
                pairs,
                items.len()
            )));
        }

        let mut cards: Vec<Card> = items
            .iter()
            .take(pairs)
            .flat_map(|item| {
                let card = Card {
                    pair_id: item.id.clone(),
                    label: item.label.clone(),
                    image_url: item.image_url.clone(),
                    state: CardState::Hidden,
                };
                [card.clone(), card]
            })
            .collect();

        let mut rng = StdRng::seed_from_u64(seed);
        cards.shuffle(&mut rng);

        Ok(Self {
            cards,
            face_up: Vec::with_capacity(2),
            attempts: 0,
            matched_pairs: 0,
        })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> u32 {
        (self.cards.len() / 2) as u32
    }

    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.total_pairs()
    }

    /// Accuracy score from 0 to 100: perfect play (one attempt per pair) is 100.
    pub fn score(&self) -> u32 {
        if self.attempts == 0 {
            return 0;
        }
        (self.matched_pairs * 100 / self.attempts).min(100)
    }

    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        // A previous mismatch stays visible until the next flip.
        if self.face_up.len() == 2 {
            for i in self.face_up.drain(..) {
                self.cards[i].state = CardState::Hidden;
            }
        }

        match self.cards.get(index) {
            Some(card) if card.state == CardState::Hidden => {}
            _ => return FlipOutcome::Ignored,
        }

        self.cards[index].state = CardState::FaceUp;
        self.face_up.push(index);

        if self.face_up.len() < 2 {
            return FlipOutcome::Revealed;
        }

        self.attempts += 1;
        let (a, b) = (self.face_up[0], self.face_up[1]);
        if self.cards[a].pair_id != self.cards[b].pair_id {
            return FlipOutcome::Mismatched;
        }

        self.cards[a].state = CardState::Matched;
        self.cards[b].state = CardState::Matched;
        self.face_up.clear();
        self.matched_pairs += 1;

        if self.is_complete() {
            FlipOutcome::Completed
        } else {
            FlipOutcome::Matched {
                pair_id: self.cards[a].pair_id.clone(),
            }
        }
    }

    /// Result payload for a finished game; `None` while pairs remain.
    pub fn to_result(
        &self,
        session_id: &str,
        student_id: &str,
        duration_secs: u32,
    ) -> Option<NewGameResult> {
        if !self.is_complete() {
            return None;
        }
        Some(NewGameResult {
            session_id: session_id.to_string(),
            student_id: student_id.to_string(),
            game: GameKind::MemoryMatch,
            score: self.score(),
            attempts: self.attempts,
            duration_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<GameItem> {
        (0..n)
            .map(|i| GameItem {
                id: format!("i-{}", i),
                label: format!("Item {}", i),
                image_url: None,
            })
            .collect()
    }

    fn partner_of(game: &MemoryMatch, index: usize) -> usize {
        let pair = &game.cards()[index].pair_id;
        game.cards()
            .iter()
            .enumerate()
            .position(|(i, c)| i != index && &c.pair_id == pair)
            .unwrap()
    }

    fn non_partner_of(game: &MemoryMatch, index: usize) -> usize {
        let pair = &game.cards()[index].pair_id;
        game.cards()
            .iter()
            .position(|c| &c.pair_id != pair)
            .unwrap()
    }

    #[test]
    fn test_deck_has_two_cards_per_pair() {
        let game = MemoryMatch::new(&items(5), 3, 7).unwrap();
        assert_eq!(game.cards().len(), 6);
        assert_eq!(game.total_pairs(), 3);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = MemoryMatch::new(&items(4), 4, 42).unwrap();
        let b = MemoryMatch::new(&items(4), 4, 42).unwrap();
        assert_eq!(a.cards(), b.cards());
    }

    #[test]
    fn test_not_enough_items() {
        assert!(MemoryMatch::new(&items(2), 3, 1).is_err());
        assert!(MemoryMatch::new(&items(2), 0, 1).is_err());
    }

    #[test]
    fn test_mismatch_is_hidden_on_next_flip() {
        let mut game = MemoryMatch::new(&items(2), 2, 3).unwrap();
        let other = non_partner_of(&game, 0);

        assert_eq!(game.flip(0), FlipOutcome::Revealed);
        assert_eq!(game.flip(other), FlipOutcome::Mismatched);
        assert_eq!(game.attempts(), 1);

        let third = (0..4).find(|i| *i != 0 && *i != other).unwrap();
        assert_eq!(game.flip(third), FlipOutcome::Revealed);
        assert_eq!(game.cards()[0].state, CardState::Hidden);
        assert_eq!(game.cards()[other].state, CardState::Hidden);
    }

    #[test]
    fn test_flipping_face_up_card_is_ignored() {
        let mut game = MemoryMatch::new(&items(2), 2, 3).unwrap();
        game.flip(1);
        assert_eq!(game.flip(1), FlipOutcome::Ignored);
        assert_eq!(game.flip(99), FlipOutcome::Ignored);
    }

    #[test]
    fn test_perfect_game_completes_with_full_score() {
        let mut game = MemoryMatch::new(&items(2), 2, 11).unwrap();

        let first = 0;
        let partner = partner_of(&game, first);
        game.flip(first);
        assert!(matches!(game.flip(partner), FlipOutcome::Matched { .. }));

        let rest: Vec<usize> = (0..4).filter(|i| *i != first && *i != partner).collect();
        game.flip(rest[0]);
        assert_eq!(game.flip(rest[1]), FlipOutcome::Completed);

        assert!(game.is_complete());
        assert_eq!(game.score(), 100);

        let result = game.to_result("s-1", "stu-1", 45).unwrap();
        assert_eq!(result.attempts, 2);
        assert_eq!(result.game, GameKind::MemoryMatch);
    }

    #[test]
    fn test_unfinished_game_has_no_result() {
        let game = MemoryMatch::new(&items(2), 2, 11).unwrap();
        assert!(game.to_result("s-1", "stu-1", 10).is_none());
    }
}
