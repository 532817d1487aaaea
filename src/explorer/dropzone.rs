/// Nested drag enter/leave tracking for one drop target.
///
/// Enter/leave events fire for every child element crossed, so a plain
/// boolean flickers off when the pointer moves between children. A counter
/// keeps the zone active until the matching number of leaves arrive; a
/// completed or cancelled drop resets it outright.
#[derive(Clone, Copy, Debug, Default)]
pub struct DropZone {
    depth: u32,
}

impl DropZone {
    pub fn enter(&mut self) {
        self.depth += 1;
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.depth = 0;
    }

    pub fn is_active(&self) -> bool {
        self.depth > 0
    }
}
