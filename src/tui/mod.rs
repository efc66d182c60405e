pub mod input;
pub mod layout;
pub mod lottery_ui;
pub mod roll;
pub mod widgets;

pub use input::{InputEffect, InputState, Tab};
pub use layout::ScreenLayout;
pub use lottery_ui::{LotteryUI, LotteryUIAction};
pub use roll::{Roll, RollStep};
