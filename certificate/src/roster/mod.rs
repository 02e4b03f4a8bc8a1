pub mod lookup;
pub mod roster;
