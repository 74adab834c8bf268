// Live event capture
//
// Recorded actions are immutable facts appended to a per-session log. The
// log is the only source of truth; stats are folded from it on demand and
// pushed to display subscribers through the live bus.

// Public API - what other modules can use
pub use bus::{LiveEventBus, LiveUpdate};
pub use events::{ActionKind, EventId, EventLog, GameEvent, PlayerRef, MADE_SHOT_POINTS};
pub use recorder::{EventRecorder, RecordError};

// Internal modules
mod bus;
mod events;
mod recorder;
