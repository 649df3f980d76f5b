#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Key,
    Axis,
    Other,
}

/// One decoded input record, consumed in the same loop iteration it was
/// read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub category: Category,
    pub code: u16,
    pub value: i32,
}

/// What a record means musically, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Note { note: u8, on: bool },
    Control { controller: u8, value: i32 },
}
