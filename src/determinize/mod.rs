//! Sampling concrete worlds from partial knowledge.
//!
//! ## Usage
//!
//! ```rust
//! use hanabi_mcts::cards::{Card, Color, Rank};
//! use hanabi_mcts::core::DeterminizeConfig;
//! use hanabi_mcts::determinize::Determinizer;
//!
//! let mut determinizer = Determinizer::new(DeterminizeConfig::default().with_seed(7));
//! let deck = determinizer.new_deck();
//! let trash = determinizer.new_trash();
//!
//! // A hand where one card was hinted as a 2 and another as blue.
//! let hand = vec![
//!     Card::unknown(),
//!     Card::rank_only(Rank::new(2).unwrap()),
//!     Card::color_only(Color::Blue),
//! ];
//!
//! let world = determinizer.sample_world(&hand, &deck, &trash).unwrap();
//! assert_eq!(world.hand[1].rank(), Rank::new(2).ok());
//! assert_eq!(world.hand[2].color(), Some(Color::Blue));
//! assert_eq!(world.deck.len(), deck.len() - 3);
//! ```

pub mod driver;

pub use driver::{Determinizer, SampledWorld};
