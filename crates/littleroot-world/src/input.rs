//! Abstract input intents. The player maps physical keys onto these.

/// Cardinal direction of a movement key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Move(Direction),
    /// Accept / advance dialogue
    Confirm,
    /// Show the inventory while held
    Inventory,
    /// Close the open panel
    Close,
    /// A printable character, used by name entry
    Char(char),
    /// Delete the last typed character
    Erase,
}
