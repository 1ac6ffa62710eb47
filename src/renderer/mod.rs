//! Scene construction
//!
//! Turns a [`FrameView`] into a flat, backend-free draw list. The canvas
//! painter in the web build and the headless binary both consume [`Scene`].

pub mod shapes;

pub use shapes::{Fill, Rect};

use crate::game::GameMode;
use crate::platform::{FrameView, Renderer};

/// Message shown over the field when not playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Title,
    Paused,
    GameOver { score: u32, new_best: bool },
}

impl Overlay {
    pub fn for_view(view: &FrameView<'_>) -> Option<Self> {
        match view.mode {
            GameMode::Ready => Some(Overlay::Title),
            GameMode::Playing => None,
            GameMode::Paused => Some(Overlay::Paused),
            GameMode::GameOver => Some(Overlay::GameOver {
                score: view.score,
                new_best: view.score >= view.best,
            }),
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Overlay::Title => "Horse Flappy",
            Overlay::Paused => "Paused",
            Overlay::GameOver { .. } => "Game Over",
        }
    }

    /// Overlay markup for the DOM
    pub fn html(&self) -> String {
        match self {
            Overlay::Title => format!(
                "<h2>{}</h2><p>Tap / Click / Press <b>Space</b> to jump</p>\
                 <p>Pass the fences. Don't touch anything.</p>",
                self.heading()
            ),
            Overlay::Paused => format!(
                "<h2>{}</h2><p>Press <b>P</b> to resume</p>",
                self.heading()
            ),
            Overlay::GameOver { score, new_best } => format!(
                "<h2>{}</h2><p>Score: <strong>{}</strong>{}</p><p>Press <b>R</b> to restart</p>",
                self.heading(),
                score,
                if *new_best { " \u{2022} New best!" } else { "" }
            ),
        }
    }
}

/// One frame's draw list, back to front
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub rects: Vec<Rect>,
    pub overlay: Option<Overlay>,
    pub score: u32,
}

/// [`Renderer`] that keeps the most recent [`Scene`]
#[derive(Debug, Default)]
pub struct SceneBuilder {
    scene: Scene,
    /// Seconds of wall time, drives the background
    time: f64,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn set_time(&mut self, seconds: f64) {
        self.time = seconds;
    }

    /// Rebuild the scene in place, reusing the rect buffer
    pub fn build(&mut self, view: &FrameView<'_>) {
        let scene = &mut self.scene;
        let ground_y = view.field_height - view.ground_height;

        scene.width = view.field_width;
        scene.height = view.field_height;
        scene.score = view.score;
        scene.overlay = Overlay::for_view(view);

        scene.rects.clear();
        scene.rects.push(shapes::sky(view.field_width, view.field_height));
        scene.rects.extend(shapes::clouds(view.field_width, self.time));
        scene.rects.extend(shapes::ground(
            view.field_width,
            view.field_height,
            view.ground_height,
        ));
        for o in view.obstacles {
            scene.rects.extend(shapes::obstacle(o, ground_y));
        }
        scene.rects.extend(shapes::horse(view.body, ground_y));
    }
}

impl Renderer for SceneBuilder {
    fn render(&mut self, view: &FrameView<'_>) {
        self.build(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Body, Field, Obstacle};
    use crate::tuning::Tuning;
    use std::collections::VecDeque;

    fn view<'a>(
        body: &'a Body,
        obstacles: &'a VecDeque<Obstacle>,
        mode: GameMode,
        score: u32,
        best: u32,
    ) -> FrameView<'a> {
        FrameView {
            body,
            obstacles,
            score,
            best,
            mode,
            field_width: 800.0,
            field_height: 600.0,
            ground_height: 56.0,
        }
    }

    #[test]
    fn test_overlay_by_mode() {
        let body = Body::spawn(Field::default(), &Tuning::default());
        let obstacles = VecDeque::new();

        assert_eq!(
            Overlay::for_view(&view(&body, &obstacles, GameMode::Ready, 0, 0)),
            Some(Overlay::Title)
        );
        assert_eq!(
            Overlay::for_view(&view(&body, &obstacles, GameMode::Playing, 0, 0)),
            None
        );
        assert_eq!(
            Overlay::for_view(&view(&body, &obstacles, GameMode::Paused, 0, 0)),
            Some(Overlay::Paused)
        );
        assert_eq!(
            Overlay::for_view(&view(&body, &obstacles, GameMode::GameOver, 4, 9)),
            Some(Overlay::GameOver {
                score: 4,
                new_best: false
            })
        );
        assert_eq!(
            Overlay::for_view(&view(&body, &obstacles, GameMode::GameOver, 9, 9)),
            Some(Overlay::GameOver {
                score: 9,
                new_best: true
            })
        );
    }

    #[test]
    fn test_game_over_html() {
        let html = Overlay::GameOver {
            score: 12,
            new_best: true,
        }
        .html();
        assert!(html.contains("Game Over"));
        assert!(html.contains("<strong>12</strong>"));
        assert!(html.contains("New best!"));

        let html = Overlay::GameOver {
            score: 3,
            new_best: false,
        }
        .html();
        assert!(!html.contains("New best!"));
    }

    #[test]
    fn test_time_moves_clouds_only() {
        let body = Body::spawn(Field::default(), &Tuning::default());
        let obstacles = VecDeque::new();
        let mut builder = SceneBuilder::new();
        builder.render(&view(&body, &obstacles, GameMode::Ready, 0, 0));
        let before = builder.scene().clone();

        builder.set_time(5.0);
        builder.render(&view(&body, &obstacles, GameMode::Ready, 0, 0));
        let after = builder.scene();
        assert_eq!(after.rects[1].pos.x, before.rects[1].pos.x - 20.0);
        assert_eq!(after.rects[0], before.rects[0]);
        assert_eq!(after.rects.last(), before.rects.last());
    }

    #[test]
    fn test_scene_layers() {
        let body = Body::spawn(Field::default(), &Tuning::default());
        let mut obstacles = VecDeque::new();
        obstacles.push_back(Obstacle {
            x: 400.0,
            width: 70.0,
            gap_center: 300.0,
            gap_height: 150.0,
            scored: false,
        });

        let mut builder = SceneBuilder::new();
        builder.render(&view(&body, &obstacles, GameMode::Playing, 2, 5));
        let scene = builder.scene();

        assert_eq!(scene.width, 800.0);
        assert_eq!(scene.score, 2);
        assert!(scene.overlay.is_none());
        // sky + clouds(6) + ground(2) + obstacle(4) + horse(7)
        assert_eq!(scene.rects.len(), 20);
        assert!(matches!(scene.rects[0].fill, Fill::Vertical { .. }));
        assert_eq!(scene.rects.last().map(|r| r.fill), Some(Fill::Solid(shapes::PUPIL)));

        // Rebuilding replaces, never accumulates
        builder.render(&view(&body, &VecDeque::new(), GameMode::Paused, 2, 5));
        assert_eq!(builder.scene().rects.len(), 16);
        assert_eq!(builder.scene().overlay, Some(Overlay::Paused));
    }
}
