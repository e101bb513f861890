//! Game controller
//!
//! Owns the simulation state, the settings, the input queue and the scene.
//! Hosts call [`Game::update`] once per frame and forward pointer input either
//! directly or through [`Game::push_input`].

use glam::Vec2;

use crate::consts::*;
use crate::input::{InputEvent, InputQueue};
use crate::scene::{MeshHandle, MeshKind, Scene};
use crate::settings::Settings;
use crate::sim::table::POCKETS;
use crate::sim::{self, GameEvent, ResetReason, SimulationState, TickOutcome};

pub struct Game<S: Scene> {
    state: SimulationState,
    settings: Settings,
    input: InputQueue,
    scene: S,
    pockets: Vec<MeshHandle>,
}

impl<S: Scene> Game<S> {
    /// Rack the balls and build the table visuals
    pub fn new(scene: S, settings: Settings) -> Self {
        let mut game = Self {
            state: SimulationState::new(),
            settings,
            input: InputQueue::new(),
            scene,
            pockets: Vec::with_capacity(POCKET_COUNT),
        };

        game.scene.setup_background(TABLE_WIDTH, TABLE_HEIGHT);
        for pocket in POCKETS {
            let handle = game.scene.create_mesh(MeshKind::Pocket {
                radius: POCKET_RADIUS,
            });
            game.scene.place_mesh(handle, pocket.x, pocket.y, 0.0);
            game.pockets.push(handle);
        }
        game.sync_visuals();

        log::info!("Table ready: {} balls, {} pockets", BALL_COUNT, POCKET_COUNT);
        game
    }

    /// Advance one frame. Queued input is handled first, then the tick runs.
    pub fn update(&mut self, dt: f32) {
        if !self.input.is_empty() {
            log::trace!("Handling {} queued input events", self.input.len());
        }
        for event in self.input.drain() {
            self.handle_input(event);
        }

        let outcome = sim::tick(&mut self.state, &self.settings, dt);
        if outcome == TickOutcome::Advanced {
            self.scene.update_progress_bar(self.state.shot.charge_progress);
        }
        self.sync_visuals();
    }

    /// Release pocketed balls' meshes, re-create missing ones after a reset,
    /// and move every live mesh to its ball
    fn sync_visuals(&mut self) {
        for ball in &mut self.state.balls {
            if ball.scored {
                if let Some(handle) = ball.take_mesh() {
                    self.scene.destroy_mesh(handle);
                }
                continue;
            }
            let handle = *ball.mesh.get_or_insert_with(|| {
                self.scene.create_mesh(MeshKind::Ball {
                    radius: BALL_RADIUS,
                })
            });
            self.scene.place_mesh(handle, ball.pos.x, ball.pos.y, 0.0);
        }
    }

    fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { pos } => self.mouse_button_pressed(pos),
            InputEvent::PointerUp { pos } => self.mouse_button_released(pos),
            InputEvent::Restart => self.restart(),
        }
    }

    /// Queue input to be handled at the start of the next update
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Start charging a shot (ignored while balls roll)
    pub fn mouse_button_pressed(&mut self, pos: Vec2) {
        if !sim::press(&mut self.state, pos) {
            log::trace!("Press ignored, balls still moving");
        }
    }

    /// Fire the cue ball toward `pos` (ignored while balls roll)
    pub fn mouse_button_released(&mut self, pos: Vec2) {
        if sim::release(&mut self.state, pos, self.settings.shot_power).is_none() {
            log::trace!("Release ignored, no shot fired");
        }
    }

    /// Rack the balls again right away
    pub fn restart(&mut self) {
        log::info!("Table reset: {:?}", ResetReason::Restart);
        self.state.reset();
        self.state.record(GameEvent::TableReset {
            reason: ResetReason::Restart,
        });
        self.sync_visuals();
    }

    /// Hand recorded events to the host. Hosts that never drain only keep
    /// the most recent [`MAX_PENDING_EVENTS`].
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Pretty JSON dump of the table
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.state)
    }

    /// Release every mesh and give the scene back
    pub fn shutdown(mut self) -> S {
        for handle in self.pockets.drain(..) {
            self.scene.destroy_mesh(handle);
        }
        for ball in &mut self.state.balls {
            if let Some(handle) = ball.take_mesh() {
                self.scene.destroy_mesh(handle);
            }
        }
        log::info!("Table shut down");
        self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::HeadlessScene;
    use crate::sim::table::START_POSITIONS;

    const DT: f32 = 1.0 / 60.0;

    fn new_game() -> Game<HeadlessScene> {
        Game::new(HeadlessScene::new(), Settings::default())
    }

    fn ball_meshes(scene: &HeadlessScene) -> usize {
        scene.live_count_of(|k| matches!(k, MeshKind::Ball { .. }))
    }

    #[test]
    fn test_new_game_builds_table() {
        let game = new_game();
        let scene = game.scene();
        assert_eq!(scene.background(), Some(Vec2::new(TABLE_WIDTH, TABLE_HEIGHT)));
        assert_eq!(ball_meshes(scene), BALL_COUNT);
        assert_eq!(scene.live_count(), BALL_COUNT + POCKET_COUNT);

        for (ball, start) in game.state().balls.iter().zip(START_POSITIONS) {
            let placement = scene.placement(ball.mesh.unwrap()).unwrap();
            assert_eq!(placement.pos, start);
        }
        for (handle, pocket) in game.pockets.iter().zip(POCKETS) {
            assert_eq!(scene.placement(*handle).unwrap().pos, pocket);
        }
    }

    #[test]
    fn test_end_to_end_shot_through_game() {
        let mut game = new_game();
        game.mouse_button_pressed(Vec2::new(0.0, 0.0));
        game.update(0.5);
        assert_eq!(game.state().shot.charge_progress, 0.5);
        assert_eq!(game.scene().progress(), 0.5);

        let target = game.state().cue_ball().pos + Vec2::new(1.0, 0.0);
        game.mouse_button_released(target);
        assert_eq!(game.state().balls[CUE_BALL].vel, Vec2::new(3.0, 0.0));
        assert!(!game.state().shot.charging);
        assert_eq!(game.state().shot.charge_progress, 0.0);

        game.update(DT);
        assert_eq!(game.scene().progress(), 0.0);
        let cue = &game.state().balls[CUE_BALL];
        assert_eq!(game.scene().placement(cue.mesh.unwrap()).unwrap().pos, cue.pos);
        assert!(cue.pos.x > START_POSITIONS[CUE_BALL].x);
    }

    #[test]
    fn test_queued_input_runs_before_physics() {
        let mut game = new_game();
        game.push_input(InputEvent::PointerDown { pos: Vec2::ZERO });
        game.update(0.25);
        assert!(game.state().shot.charging);
        assert_eq!(game.state().shot.charge_progress, 0.25);

        let target = game.state().cue_ball().pos + Vec2::new(0.0, 2.0);
        game.push_input(InputEvent::PointerUp { pos: target });
        game.update(DT);
        // Fired at 25% then one frame of travel and friction
        let vel = game.state().balls[CUE_BALL].vel;
        assert!(vel.x.abs() < 1e-6);
        assert!((vel.y - (1.5 - FRICTION)).abs() < 1e-5);
    }

    #[test]
    fn test_input_ignored_while_moving() {
        let mut game = new_game();
        game.state.balls[4].vel = Vec2::new(0.5, 0.0);
        game.mouse_button_pressed(Vec2::ZERO);
        assert!(!game.state().shot.charging);
        game.mouse_button_released(Vec2::ZERO);
        assert_eq!(game.state().balls[CUE_BALL].vel, Vec2::ZERO);
        assert_eq!(game.state().balls[4].vel, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_pocketed_ball_mesh_destroyed_once() {
        let mut game = new_game();
        game.state.balls[2].pos = POCKETS[4] + Vec2::new(0.0, -0.2);
        let handle = game.state().balls[2].mesh.unwrap();

        game.update(DT);
        assert!(game.state().balls[2].scored);
        assert!(game.state().balls[2].mesh.is_none());
        assert!(!game.scene().is_live(handle));
        assert_eq!(ball_meshes(game.scene()), BALL_COUNT - 1);

        // Later frames never touch the dead handle
        for _ in 0..5 {
            game.update(DT);
        }
        assert_eq!(game.scene().stale_ops(), 0);
        let events = game.drain_events();
        let pocketed = events
            .iter()
            .filter(|e| matches!(e, GameEvent::BallPocketed { ball: 2, .. }))
            .count();
        assert_eq!(pocketed, 1);
    }

    #[test]
    fn test_cue_ball_pocketed_resets_table_and_visuals() {
        let mut game = new_game();
        game.state.balls[5].pos = POCKETS[0];
        game.update(DT);
        game.state.balls[CUE_BALL].pos = POCKETS[3];
        game.update(DT);
        assert!(game.state().balls[CUE_BALL].scored);
        assert_eq!(ball_meshes(game.scene()), BALL_COUNT - 2);

        game.update(DT);
        for (ball, start) in game.state().balls.iter().zip(START_POSITIONS) {
            assert!(!ball.scored);
            assert_eq!(ball.pos, start);
            assert_eq!(ball.vel, Vec2::ZERO);
            let placement = game.scene().placement(ball.mesh.unwrap()).unwrap();
            assert_eq!(placement.pos, start);
        }
        assert_eq!(ball_meshes(game.scene()), BALL_COUNT);
        assert_eq!(game.scene().stale_ops(), 0);
        assert!(game.drain_events().contains(&GameEvent::TableReset {
            reason: ResetReason::CueBallPocketed
        }));
    }

    #[test]
    fn test_restart_request() {
        let mut game = new_game();
        game.state.balls[1].pos = POCKETS[2];
        game.update(DT);
        game.state.balls[3].vel = Vec2::new(1.0, 1.0);

        game.push_input(InputEvent::Restart);
        game.update(DT);
        assert!(game.state().balls.iter().all(|b| !b.scored));
        assert_eq!(ball_meshes(game.scene()), BALL_COUNT);
        assert!(game.drain_events().contains(&GameEvent::TableReset {
            reason: ResetReason::Restart
        }));
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let mut game = new_game();
        game.state.balls[6].pos = POCKETS[5];
        game.update(DT);
        let scene = game.shutdown();
        assert_eq!(scene.live_count(), 0);
        assert_eq!(scene.stale_ops(), 0);
    }

    #[test]
    fn test_autoplay_keeps_scene_in_step() {
        use crate::autoplay::AutoPlayer;

        let mut game = new_game();
        let mut player = AutoPlayer::new(2024);
        let mut shots = 0;
        for _ in 0..5000 {
            if let Some(event) = player.step(game.state(), game.settings(), DT) {
                game.push_input(event);
            }
            game.update(DT);
            shots += game
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::ShotFired { .. }))
                .count();

            let on_table = game.state().balls.iter().filter(|b| !b.scored).count();
            assert_eq!(ball_meshes(game.scene()), on_table);
            assert_eq!(game.scene().stale_ops(), 0);
            for ball in &game.state().balls {
                assert!(ball.pos.is_finite() && ball.vel.is_finite());
            }
        }
        assert!(shots > 0);
    }

    #[test]
    fn test_undrained_events_stay_bounded() {
        let mut game = new_game();
        // Resting ball with its edge past the top wall
        game.state.balls[3].pos = Vec2::new(START_POSITIONS[3].x, TABLE_HEIGHT / 2.0 - 0.2);
        for _ in 0..10_000 {
            game.update(DT);
        }
        assert_eq!(game.state().balls[3].vel, Vec2::ZERO);
        assert!(game.state().events.is_empty());

        // A host that never drains still holds a bounded backlog
        for _ in 0..MAX_PENDING_EVENTS {
            game.push_input(InputEvent::Restart);
            game.update(DT);
        }
        game.push_input(InputEvent::PointerDown { pos: Vec2::ZERO });
        game.update(DT);
        game.mouse_button_released(Vec2::ZERO);
        let events = &game.state().events;
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        assert!(matches!(events.last(), Some(GameEvent::ShotFired { .. })));
    }

    #[test]
    fn test_snapshot_json_lists_balls() {
        let game = new_game();
        let json = game.snapshot_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["balls"].as_array().unwrap().len(), BALL_COUNT);
        assert_eq!(value["balls"][0]["scored"], serde_json::Value::Bool(false));
        assert_eq!(value["shot"]["charging"], serde_json::Value::Bool(false));
    }
}
