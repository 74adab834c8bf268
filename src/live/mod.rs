// Live display feed
//
// Display clients connect over a websocket and receive every update the
// capture service publishes. They are read-only; anything they send is
// ignored.

// Public API
pub use handler::live_socket;
pub use socket::{LiveConnection, SocketError, SocketWrapper};

// Internal modules
mod handler;
mod socket;
