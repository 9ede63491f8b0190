/// Snapshot of where a quiz attempt stands, for "Question n of m" style displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based number of the question on screen; `None` once complete.
    pub position: Option<usize>,
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}
