/// Search box state for the etude grid.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
}
