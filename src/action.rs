//! Discrete controller outputs and their wire encoding.
//!
//! The executor accepts a single action index per frame and takes care of
//! pressing and releasing the implied buttons for the action duration.
//! `JumpRight` is the one composite action: Right and A held together.

/// Game Boy buttons the executor can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Down,
    Left,
    Right,
    Up,
    A,
    B,
}

/// One decision per frame. Closed set; carries no payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Down,
    Left,
    Right,
    Up,
    Jump,
    Run,
    JumpRight,
}

pub const ACTIONS: [Action; 7] = [
    Action::Down,
    Action::Left,
    Action::Right,
    Action::Up,
    Action::Jump,
    Action::Run,
    Action::JumpRight,
];

impl Action {
    /// Stable wire index understood by the executor (and used in action logs).
    pub fn index(self) -> u8 {
        match self {
            Self::Down => 0,
            Self::Left => 1,
            Self::Right => 2,
            Self::Up => 3,
            Self::Jump => 4,
            Self::Run => 5,
            Self::JumpRight => 6,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        ACTIONS.iter().copied().find(|a| a.index() == index)
    }

    /// Buttons held for this action's duration.
    pub fn buttons(self) -> &'static [Button] {
        match self {
            Self::Down => &[Button::Down],
            Self::Left => &[Button::Left],
            Self::Right => &[Button::Right],
            Self::Up => &[Button::Up],
            Self::Jump => &[Button::A],
            Self::Run => &[Button::B],
            Self::JumpRight => &[Button::Right, Button::A],
        }
    }
}
