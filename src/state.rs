#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// A provisional shape is being dragged out from `start`.
    Drawing { start: [f32; 2] },
    /// The selected shape follows the pointer, held at `offset` from its origin.
    Moving { offset: [f32; 2] },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }
}
