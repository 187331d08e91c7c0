pub mod emotion;
pub mod session;

pub use emotion::{CoreEmotion, CoreInfo, EmotionData, UnknownCoreEmotion};
pub use session::{now_millis, NavigationEntry, SessionState, Step};
