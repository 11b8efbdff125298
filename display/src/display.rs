use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::FrameBuffer;

/// Window pixels per framebuffer cell.
const SCALE: u32 = 10;

/// Renders the machine's 64x32 monochrome framebuffer into an SDL2 window.
///
/// The renderer owns no VM state; it reads whatever framebuffer snapshot
/// the host hands it, on whatever cadence the host chooses.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Open a scaled window bound to an SDL2 context.
    pub fn new(sdl: &sdl2::Sdl) -> Self {
        let video = sdl.video().unwrap();
        let window = video
            .window(
                "chip8",
                DISPLAY_WIDTH as u32 * SCALE,
                DISPLAY_HEIGHT as u32 * SCALE,
            )
            .position_centered()
            .opengl()
            .build()
            .unwrap();

        Display {
            canvas: window.into_canvas().build().unwrap(),
        }
    }

    /// Flatten the cell grid into RGB24 texture bytes: rows concatenated,
    /// three channel bytes per cell, lit cells white and dark cells black.
    fn rgb_bytes(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flatten()
            .flat_map(|&lit| {
                let channel = if lit { 0xFF } else { 0x00 };
                [channel; 3]
            })
            .collect()
    }

    /// Upload the framebuffer as a streaming texture and present it, letting
    /// SDL2 scale the 64x32 image up to the window size.
    pub fn render(&mut self, frame: &FrameBuffer) {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .unwrap();

        texture
            .with_lock(None, |buffer: &mut [u8], _pitch: usize| {
                buffer.copy_from_slice(&Display::rgb_bytes(frame));
            })
            .unwrap();

        self.canvas.copy(&texture, None, None).unwrap();
        self.canvas.present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_bytes_places_cells_row_major() {
        let mut frame: FrameBuffer = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[0][1] = true;
        frame[1][0] = true;
        let bytes = Display::rgb_bytes(&frame);

        assert_eq!(bytes.len(), DISPLAY_WIDTH * DISPLAY_HEIGHT * 3);
        assert_eq!(bytes[0..6], [0, 0, 0, 255, 255, 255]);
        let second_row = DISPLAY_WIDTH * 3;
        assert_eq!(bytes[second_row..second_row + 6], [255, 255, 255, 0, 0, 0]);
    }
}
