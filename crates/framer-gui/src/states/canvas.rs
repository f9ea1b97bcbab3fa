/// Uploaded preview surface.
#[derive(Default)]
pub struct CanvasState {
    pub texture: Option<egui::TextureHandle>,
}
