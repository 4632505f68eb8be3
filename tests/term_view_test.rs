//! GameView rendering from live engine snapshots

use falltris::core::{EngineConfig, GameState, RecordingScheduler};
use falltris::term::{Canvas, GameView, Viewport};

fn screen_text(canvas: &Canvas) -> String {
    (0..canvas.height())
        .map(|y| canvas.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_render_tracks_game_progress() {
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut game = GameState::new(EngineConfig::default(), 42, RecordingScheduler::new());

    let idle = screen_text(&view.render(&game.snapshot(), viewport));
    assert!(idle.contains("PRESS ENTER"));

    game.start();
    let playing = screen_text(&view.render(&game.snapshot(), viewport));
    assert!(!playing.contains("PRESS ENTER"));
    assert!(playing.contains("SCORE"));
    assert!(playing.contains("500ms"));

    while !game.game_over() {
        game.hard_drop();
    }
    let over = screen_text(&view.render(&game.snapshot(), viewport));
    assert!(over.contains("GAME OVER"));
}

#[test]
fn test_render_into_reuses_canvas() {
    let view = GameView::default();
    let mut game = GameState::new(EngineConfig::default(), 1, RecordingScheduler::new());
    game.start();

    let mut canvas = Canvas::new(1, 1);
    view.render_into(&game.snapshot(), Viewport::new(40, 22), &mut canvas);
    assert_eq!((canvas.width(), canvas.height()), (40, 22));

    let fresh = view.render(&game.snapshot(), Viewport::new(40, 22));
    assert_eq!(canvas, fresh);
}
