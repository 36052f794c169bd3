//! `tour-agents` — the agent controllers of the `rust_tour` framework.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`guide`]      | `Guide` — route-planning state machine                     |
//! | [`visitor`]    | `Visitor` — perception-driven steering controller          |
//! | [`exhibit`]    | `Exhibit` — per-visitor attention counters                 |
//! | [`steering`]   | `Kinematics` plus the shared force primitives              |
//! | [`perception`] | Field-of-view cosine and visibility checks                 |
//! | [`event`]      | `Narration` / `Listening` marker events                    |
//!
//! # Design notes
//!
//! Each controller exposes a per-tick entry point (`Guide::step`,
//! `Visitor::step`, `Exhibit::observe`) that mutates only its own agent.
//! Everything an agent reads about the rest of the world arrives through a
//! read-only view (`Surroundings`, `WatcherView`), so the tick loop can hand
//! out disjoint borrows without any interior mutability.
//!
//! Per-tick updates return no `Result`: a failed path search or a rejected
//! move is a recoverable steering condition, handled inside the controller,
//! never an error that could escape a tick.

pub mod event;
pub mod exhibit;
pub mod guide;
pub mod perception;
pub mod steering;
pub mod visitor;


pub use event::{Listening, Narration};
pub use exhibit::{Exhibit, WatcherView};
pub use guide::{Guide, GuideSignal, GuideState};
pub use steering::{Kinematics, MoveOutcome};
pub use visitor::{Surroundings, Visitor};
