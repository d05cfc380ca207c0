use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_wireframe::core::{
    draw_line, fill_triangle_depth, Camera, Canvas, Mesh, MeshArena, RenderConfig, Renderer, Scene,
    ScreenVertex, Viewer,
};
use tui_wireframe::types::{DVec3, ViewerAction};

fn bench_fill_triangle(c: &mut Criterion) {
    let mut canvas = Canvas::new(160, 88);
    let a = ScreenVertex::new(10.0, 5.0, 5.0);
    let b = ScreenVertex::new(150.0, 40.0, 6.0);
    let d = ScreenVertex::new(40.0, 85.0, 7.0);

    c.bench_function("fill_triangle_160x88", |bench| {
        bench.iter(|| {
            canvas.reset(160, 88);
            fill_triangle_depth(&mut canvas, black_box(a), black_box(b), black_box(d));
        })
    });
}

fn bench_draw_line(c: &mut Criterion) {
    let mut canvas = Canvas::new(160, 88);
    let config = RenderConfig::default();
    let a = ScreenVertex::new(0.0, 0.0, 5.0);
    let b = ScreenVertex::new(159.0, 87.0, 60.0);

    c.bench_function("draw_line_diagonal_fog", |bench| {
        bench.iter(|| {
            canvas.reset(160, 88);
            draw_line(&mut canvas, black_box(a), black_box(b), config.active_fog());
        })
    });
}

fn bench_cube_frame(c: &mut Criterion) {
    let mut arena = MeshArena::new();
    let cube = arena.insert(Mesh::cube());
    let mut scene = Scene::new();
    scene.add(cube, DVec3::ZERO);
    let mut camera = Camera::default();
    camera.orbit(0.7, 0.7);
    let config = RenderConfig::default();
    let mut renderer = Renderer::new();
    let mut canvas = Canvas::new(160, 88);

    c.bench_function("frame_single_cube", |bench| {
        bench.iter(|| {
            renderer.render_into(&mut canvas, &scene, &arena, &camera, &config);
        })
    });
}

fn bench_crowded_frame(c: &mut Criterion) {
    let mut arena = MeshArena::new();
    let cube = arena.insert(Mesh::cube());
    let mut scene = Scene::new();
    scene.add(cube, DVec3::ZERO);
    let mut viewer = Viewer::new(RenderConfig::default(), scene, cube, 12345);
    for _ in 0..200 {
        viewer.apply_action(ViewerAction::AddInstance);
    }
    let mut renderer = Renderer::new();
    let mut canvas = Canvas::new(160, 88);

    c.bench_function("frame_200_cubes", |bench| {
        bench.iter(|| {
            renderer.render_into(&mut canvas, &viewer.scene, &arena, &viewer.camera, &viewer.config);
        })
    });
}

criterion_group!(
    benches,
    bench_fill_triangle,
    bench_draw_line,
    bench_cube_frame,
    bench_crowded_frame
);
criterion_main!(benches);
