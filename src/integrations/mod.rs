pub mod chain;
pub mod clipboard;
pub mod command;
pub mod opener;
pub mod traits;

pub use chain::StrategyChain;
pub use clipboard::{system_clipboard, Osc52Strategy};
pub use command::{CommandStrategy, PayloadMode};
pub use opener::{system_opener, PrintStrategy};
pub use traits::DeliveryStrategy;
