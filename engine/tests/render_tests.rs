use engine::goldens::rgba_sha256_hex;
use engine::graphics::{hsl_to_rgba, CpuRenderer, Renderer2d};
use engine::surface::{RgbaBufferSurface, Surface, SurfaceSize};
use engine::ui::Rect;

const SIZE: SurfaceSize = SurfaceSize::new(64, 48);

fn draw_sample_scene(surface: &mut RgbaBufferSurface) {
    let size = surface.size();
    let mut gfx = CpuRenderer::new(surface.frame_mut(), size);
    gfx.begin_frame(size);
    gfx.clear([10, 10, 30, 255]);
    gfx.fill_rect(Rect::new(4, 4, 20, 12), [80, 40, 120, 255]);
    gfx.rect_outline(Rect::new(30, 8, 16, 16), [255, 255, 255, 255]);
    gfx.fill_circle(48.5, 30.5, 6.0, hsl_to_rgba(200.0, 100.0, 60.0), 180);
    gfx.draw_text(6, 30, "3 2 1 0", [255, 220, 80, 255]);
}

#[test]
fn same_scene_renders_byte_identically() {
    let mut a = RgbaBufferSurface::new(SIZE);
    let mut b = RgbaBufferSurface::new(SIZE);
    draw_sample_scene(&mut a);
    draw_sample_scene(&mut b);

    assert_eq!(rgba_sha256_hex(a.frame()), rgba_sha256_hex(b.frame()));
}

#[test]
fn scene_differs_from_empty_frame() {
    let mut drawn = RgbaBufferSurface::new(SIZE);
    let empty = RgbaBufferSurface::new(SIZE);
    draw_sample_scene(&mut drawn);

    assert_ne!(rgba_sha256_hex(drawn.frame()), rgba_sha256_hex(empty.frame()));
}

#[test]
fn text_touches_pixels_inside_its_box() {
    let mut surface = RgbaBufferSurface::new(SIZE);
    let size = surface.size();
    let mut gfx = CpuRenderer::new(surface.frame_mut(), size);
    gfx.begin_frame(size);
    gfx.draw_text_scaled(0, 0, "8", [255, 255, 255, 255], 1);

    let touched = surface.frame().iter().any(|&b| b != 0);
    assert!(touched);
}

#[test]
fn out_of_bounds_drawing_is_ignored() {
    let mut surface = RgbaBufferSurface::new(SIZE);
    let size = surface.size();
    let mut gfx = CpuRenderer::new(surface.frame_mut(), size);
    gfx.begin_frame(size);
    gfx.fill_rect(Rect::new(1000, 1000, 50, 50), [255, 0, 0, 255]);
    gfx.fill_circle(-20.0, -20.0, 5.0, [255, 0, 0, 255], 255);

    assert!(surface.frame().iter().all(|&b| b == 0));
}
