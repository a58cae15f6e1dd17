//! Player cards and the draw/hand/discard cycle.

use arrayvec::ArrayVec;

use crate::config::{CardTuning, CombatConfig};
use crate::rng::{RngOracle, SeedContext, compute_seed};

/// Per-instance card identity. Two cards of the same kind never share an id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CardId(pub u32);

impl core::fmt::Display for CardId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Card archetypes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CardKind {
    StrongAttack,
    DoubleAttack,
    Defend,
    Counter,
}

impl CardKind {
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::StrongAttack => "Strong Attack",
            Self::DoubleAttack => "Double Attack",
            Self::Defend => "Defend",
            Self::Counter => "Counter",
        }
    }
}

/// A card the player owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionCard {
    pub id: CardId,
    pub kind: CardKind,
    /// Action points spent when played.
    pub cost: u32,
}

pub type Hand = ArrayVec<ActionCard, { CombatConfig::MAX_HAND }>;

/// Draw pile, hand and discard pile of one encounter.
///
/// Cards move draw -> hand -> discard. When the draw pile runs dry the
/// discard pile is shuffled back in; the shuffle seed is derived from the
/// encounter seed and the number of reshuffles so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deck {
    /// Top of the pile is the last element.
    draw_pile: Vec<ActionCard>,
    hand: Hand,
    discard_pile: Vec<ActionCard>,
    reshuffles: u32,
}

impl Deck {
    /// Builds a shuffled deck, assigning ids `1..=kinds.len()`.
    pub fn build<R: RngOracle>(
        kinds: &[CardKind],
        tuning: &CardTuning,
        seed: u64,
        rng: &R,
    ) -> Self {
        let mut draw_pile: Vec<ActionCard> = kinds
            .iter()
            .zip(1u32..)
            .map(|(&kind, id)| ActionCard {
                id: CardId(id),
                kind,
                cost: tuning.cost(kind),
            })
            .collect();

        rng.shuffle(
            compute_seed(seed, 0, 0, SeedContext::Shuffle as u32),
            &mut draw_pile,
        );

        Self {
            draw_pile,
            hand: Hand::new(),
            discard_pile: Vec::new(),
            reshuffles: 0,
        }
    }

    /// Draws until the hand holds `target` cards or no cards remain anywhere.
    ///
    /// Returns the number of cards drawn.
    pub fn draw_to<R: RngOracle>(&mut self, target: usize, seed: u64, rng: &R) -> usize {
        let target = target.min(CombatConfig::MAX_HAND);
        let mut drawn = 0;

        while self.hand.len() < target {
            if self.draw_pile.is_empty() {
                if self.discard_pile.is_empty() {
                    break;
                }
                self.recycle_discard(seed, rng);
            }

            let Some(card) = self.draw_pile.pop() else {
                break;
            };
            self.hand.push(card);
            drawn += 1;
        }

        drawn
    }

    fn recycle_discard<R: RngOracle>(&mut self, seed: u64, rng: &R) {
        self.reshuffles += 1;
        let mut recycled = core::mem::take(&mut self.discard_pile);
        rng.shuffle(
            compute_seed(
                seed,
                u64::from(self.reshuffles),
                0,
                SeedContext::DeckRecycle as u32,
            ),
            &mut recycled,
        );
        // Cards still in the draw pile stay on top.
        recycled.append(&mut self.draw_pile);
        self.draw_pile = recycled;
    }

    pub fn find_in_hand(&self, id: CardId) -> Option<&ActionCard> {
        self.hand.iter().find(|card| card.id == id)
    }

    /// Moves a card from the hand to the discard pile.
    pub fn play(&mut self, id: CardId) -> Option<ActionCard> {
        let position = self.hand.iter().position(|card| card.id == id)?;
        let card = self.hand.remove(position);
        self.discard_pile.push(card);
        Some(card)
    }

    /// Moves the whole hand to the discard pile.
    pub fn discard_hand(&mut self) {
        self.discard_pile.extend(self.hand.drain(..));
    }

    pub fn hand(&self) -> &[ActionCard] {
        &self.hand
    }

    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_pile_len(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    /// Every card the player owns this encounter.
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len() + self.hand.len() + self.discard_pile.len()
    }
}
