pub mod picking;
pub mod queue;

pub use picking::{pick, Ray, SelectionResult};
pub use queue::{InputEvent, InputQueue};
