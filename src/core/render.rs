//=========================================================================
// Render Surface
//
// Narrow capability contract for the rendering backend.
//
// The core never touches pixels or primitives. It only needs to clear
// the surface at the top of a frame and bracket each entity's paint
// calls in a saved/restored style scope. Concrete drawing happens in
// host entity code against whatever backend implements this trait.
//
//=========================================================================

//=== RenderSurface =======================================================

/// Scoped-acquisition contract for a drawing target.
pub trait RenderSurface {
    /// Erases the previous frame.
    fn clear(&mut self);

    /// Pushes the current style state.
    fn save(&mut self);

    /// Pops back to the last saved style state.
    fn restore(&mut self);
}

//=== NullSurface =========================================================

/// Surface that discards everything.
///
/// Used by headless hosts and tests that only exercise simulation.
#[derive(Debug, Default)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn clear(&mut self) {}
    fn save(&mut self) {}
    fn restore(&mut self) {}
}
