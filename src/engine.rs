//=========================================================================
// Caprine Engine
//
// The entity registry and the tick/update/draw cycle.
//
// Architecture:
// ```text
//     EngineBuilder ──build()──> Engine ──frame()──> [per tick]
//         │                        │
//         ├─ with_max_step()       ├─ pump events (fan-in)
//         ├─ with_event_source()   ├─ pause gate
//         ├─ with_gamepads()       ├─ clock tick (clamped delta)
//         └─ with_audio()          ├─ update pass + removal sweep
//                                  ├─ controller reconciliation
//                                  ├─ draw pass (transition-aware)
//                                  └─ clear one-shot inputs
// ```
//
// The host invokes `frame` at its own cadence (display refresh, a
// timer, or a fixed-step test driver via `frame_fixed`); the engine
// makes no timing promises beyond the clock's clamped delta. Everything
// here runs on one thread; the ordering of the steps above IS the
// concurrency contract.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Receiver;
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::audio::{AudioService, NullAudio};
use crate::core::clock::{GameClock, DEFAULT_MAX_STEP};
use crate::core::entity::{Entity, EntityKind, PlayerStatus, UpdateContext};
use crate::core::input::{BindingTable, GamepadProvider, InputEvent, InputSnapshot, KeyCode};
use crate::core::render::RenderSurface;
use crate::core::scene::SceneContent;
use crate::core::session::MAX_PLAYERS;

//=== EntityId ============================================================

/// Registry handle assigned when an entity is added.
///
/// Stable for the entity's whole lifetime; subset lists and the binding
/// table reference entities by id, so the removal sweep can reconcile
/// every view of the master list.
pub type EntityId = u64;

struct EntityEntry {
    id: EntityId,
    entity: Box<dyn Entity>,
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **max_step**: 0.05 s clamp on any single tick's delta
/// - **Pause key**: Escape, **debug key**: F
/// - **AI toggle keys**: 1-4, one per player slot, acting on key release
/// - No event source, no gamepads, silent audio, no background track
///
/// # Examples
///
/// ```
/// use caprine_engine::EngineBuilder;
///
/// let engine = EngineBuilder::new()
///     .with_max_step(1.0 / 30.0)
///     .build();
/// assert!(!engine.is_paused());
/// ```
pub struct EngineBuilder {
    max_step: f64,
    pause_key: KeyCode,
    debug_key: KeyCode,
    ai_toggle_keys: [KeyCode; MAX_PLAYERS],
    events: Option<Receiver<InputEvent>>,
    gamepads: Option<Box<dyn GamepadProvider>>,
    audio: Box<dyn AudioService>,
    background_track: Option<(String, f32)>,
}

impl EngineBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            max_step: DEFAULT_MAX_STEP,
            pause_key: KeyCode::Escape,
            debug_key: KeyCode::KeyF,
            ai_toggle_keys: [
                KeyCode::Digit1,
                KeyCode::Digit2,
                KeyCode::Digit3,
                KeyCode::Digit4,
            ],
            events: None,
            gamepads: None,
            audio: Box::new(NullAudio),
            background_track: None,
        }
    }

    /// Sets the per-tick delta clamp in seconds.
    ///
    /// # Panics
    ///
    /// Panics if `max_step` is not positive.
    pub fn with_max_step(mut self, max_step: f64) -> Self {
        assert!(max_step > 0.0, "max_step must be positive, got {}", max_step);
        self.max_step = max_step;
        self
    }

    /// Sets the global pause-toggle key.
    pub fn with_pause_key(mut self, key: KeyCode) -> Self {
        self.pause_key = key;
        self
    }

    /// Sets the global debug-toggle key.
    pub fn with_debug_key(mut self, key: KeyCode) -> Self {
        self.debug_key = key;
        self
    }

    /// Sets the four per-slot autonomous-control toggle keys.
    pub fn with_ai_toggle_keys(mut self, keys: [KeyCode; MAX_PLAYERS]) -> Self {
        self.ai_toggle_keys = keys;
        self
    }

    /// Attaches a channel the platform layer feeds input events into.
    ///
    /// The engine drains it completely at the top of every frame, so
    /// events produced on another thread are observed at tick
    /// granularity.
    pub fn with_event_source(mut self, events: Receiver<InputEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Attaches the controller polling seam.
    pub fn with_gamepads(mut self, provider: Box<dyn GamepadProvider>) -> Self {
        self.gamepads = Some(provider);
        self
    }

    /// Replaces the (silent) audio service.
    pub fn with_audio(mut self, audio: Box<dyn AudioService>) -> Self {
        self.audio = audio;
        self
    }

    /// Queues a looped background track fired once by [`Engine::start`].
    pub fn with_background_track(mut self, track: impl Into<String>, volume: f32) -> Self {
        self.background_track = Some((track.into(), volume));
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!("Building engine (max_step: {}s)", self.max_step);

        Engine {
            entities: Vec::new(),
            collidables: Vec::new(),
            players: Vec::new(),
            director: None,
            next_id: 0,
            bindings: BindingTable::new(),
            snapshot: InputSnapshot::new(),
            roster: Vec::new(),
            clock: GameClock::new(self.max_step),
            delta: 0.0,
            paused: false,
            debug: false,
            pause_key: self.pause_key,
            debug_key: self.debug_key,
            ai_toggle_keys: self.ai_toggle_keys,
            events: self.events,
            gamepads: self.gamepads,
            audio: self.audio,
            background_track: self.background_track,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Master entity registry, input snapshot, and tick driver.
///
/// # Registry Views
///
/// `add_entity` routes each entity by kind into the master list plus
/// zero or more subset lists (collidables, player agents). Subsets hold
/// ids, never second owners; the removal sweep reconciles them all.
///
/// # Tick Shape
///
/// ```text
/// pump events → [paused? stop] → clock → update all → sweep removed
///   → reconcile controllers → draw → clear one-shot inputs
/// ```
pub struct Engine {
    entities: Vec<EntityEntry>,
    collidables: Vec<EntityId>,
    players: Vec<EntityId>,
    director: Option<EntityId>,
    next_id: EntityId,
    bindings: BindingTable,
    snapshot: InputSnapshot,
    roster: Vec<PlayerStatus>,
    clock: GameClock,
    delta: f64,
    paused: bool,
    debug: bool,
    pause_key: KeyCode,
    debug_key: KeyCode,
    ai_toggle_keys: [KeyCode; MAX_PLAYERS],
    events: Option<Receiver<InputEvent>>,
    gamepads: Option<Box<dyn GamepadProvider>>,
    audio: Box<dyn AudioService>,
    background_track: Option<(String, f32)>,
}

impl Engine {
    //--- Registry ---------------------------------------------------------

    /// Adds an entity, routing it by kind.
    ///
    /// - `Background`, `Collectible`: master list only
    /// - `Platform`: master + collidables
    /// - `Player`: master + collidables + player agents, and the agent's
    ///   keyboard layout (if any) joins the central dispatch table
    /// - `Director`: master list, tracked as the top-level game state
    /// - `Other`: accepted into no list and dropped, with a warning
    ///
    /// Returns the assigned id, or `None` for unrecognized kinds.
    pub fn add_entity(&mut self, entity: Box<dyn Entity>) -> Option<EntityId> {
        let kind = entity.kind();
        if kind == EntityKind::Other {
            warn!("Entity of unrecognized kind accepted into no registry list");
            return None;
        }

        let id = self.alloc_id();
        match kind {
            EntityKind::Platform => self.collidables.push(id),
            EntityKind::Player => {
                self.collidables.push(id);
                self.players.push(id);
                if let Some(layout) = entity.as_player().and_then(|agent| agent.bindings()) {
                    self.bindings.register(id, layout);
                }
            }
            EntityKind::Director => {
                if self.director.is_some() {
                    warn!("Replacing previously tracked director entity");
                }
                self.director = Some(id);
            }
            EntityKind::Background | EntityKind::Collectible | EntityKind::Other => {}
        }

        debug!("Added {:?} entity as id {}", kind, id);
        self.entities.push(EntityEntry { id, entity });
        Some(id)
    }

    /// Flattens a scene composite into the registry.
    ///
    /// The background lands in the master list; every obstacle lands in
    /// both the master and collidable lists. Bulk append preserves
    /// insertion order, so later entries draw on top and update after
    /// earlier ones.
    pub fn load_scene(&mut self, content: SceneContent) {
        let SceneContent { background, obstacles } = content;

        let id = self.alloc_id();
        self.entities.push(EntityEntry { id, entity: background });

        let count = obstacles.len();
        for obstacle in obstacles {
            let id = self.alloc_id();
            self.collidables.push(id);
            self.entities.push(EntityEntry { id, entity: obstacle });
        }

        debug!("Scene flattened: background + {} obstacles", count);
    }

    /// Empties every registry list ahead of loading new scene content.
    pub fn prep_for_scene(&mut self) {
        self.entities.clear();
        self.collidables.clear();
        self.players.clear();
        self.roster.clear();
        self.director = None;
        self.bindings.clear();
        debug!("Registry cleared for next scene");
    }

    fn alloc_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    //--- Session ----------------------------------------------------------

    /// Fires the configured background track and logs the roster.
    ///
    /// Call once after composition, before the first frame. Audio is
    /// fire-and-forget; the engine never touches the track again.
    pub fn start(&mut self) {
        if let Some((track, volume)) = self.background_track.take() {
            info!("Starting looped background track '{}' at volume {}", track, volume);
            self.audio.play_looped(&track, volume);
        }
        info!(
            "Engine started: {} entities, {} collidables, {} players",
            self.entities.len(),
            self.collidables.len(),
            self.players.len()
        );
    }

    //--- Input ------------------------------------------------------------

    /// Centralized dispatch for one device event.
    ///
    /// Updates the snapshot, services the global toggles, and routes
    /// bound keys into the owning agent's control state. Hosts without a
    /// channel feed events here directly.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                if key == KeyCode::Unidentified {
                    return;
                }
                self.snapshot.press(key);
                if key == self.debug_key {
                    self.debug = !self.debug;
                    info!("debugging turned {}", if self.debug { "on" } else { "off" });
                }
                if key == self.pause_key {
                    self.paused = !self.paused;
                    info!("{}", if self.paused { "paused" } else { "unpaused" });
                }
                self.dispatch_control(key, true);
            }
            InputEvent::KeyUp(key) => {
                self.snapshot.release(key);
                if let Some(slot) = self.ai_toggle_keys.iter().position(|&k| k == key) {
                    self.toggle_autonomous(slot);
                }
                self.dispatch_control(key, false);
            }
            InputEvent::PointerMoved { x, y } => self.snapshot.set_pointer(x, y),
            InputEvent::Click { x, y } => self.snapshot.set_click(x, y),
            InputEvent::RightClick { x, y } => self.snapshot.set_right_click(x, y),
            InputEvent::Wheel { delta } => self.snapshot.set_wheel(delta),
        }
    }

    fn dispatch_control(&mut self, key: KeyCode, pressed: bool) {
        let Some((agent_id, control)) = self.bindings.lookup(key) else {
            return;
        };
        if let Some(entry) = self.entities.iter_mut().find(|e| e.id == agent_id) {
            if let Some(agent) = entry.entity.as_player_mut() {
                agent.controls_mut().set(control, pressed);
            }
        }
    }

    fn toggle_autonomous(&mut self, slot: usize) {
        for entry in self.entities.iter_mut() {
            if let Some(agent) = entry.entity.as_player_mut() {
                if agent.player_index() == slot {
                    let enabled = !agent.is_autonomous();
                    agent.controls_mut().clear();
                    agent.set_autonomous(enabled);
                    info!(
                        "Player {} autonomous control {}",
                        slot,
                        if enabled { "on" } else { "off" }
                    );
                }
            }
        }
    }

    fn pump_events(&mut self) {
        let Some(receiver) = self.events.as_ref() else {
            return;
        };
        let drained: Vec<InputEvent> = receiver.try_iter().collect();
        for event in drained {
            self.handle_event(event);
        }
    }

    //--- Update Pass ------------------------------------------------------

    /// One full simulation pass over the registry.
    ///
    /// Every non-flagged entity updates exactly once, in list order.
    /// Then the sweep walks the master list from the end backward
    /// (index-stable under deletion) and drops every flagged entity from
    /// every view. Finally controller state is reconciled into the
    /// agents' unified key-state.
    pub fn update(&mut self) {
        self.refresh_roster();

        {
            let Self { entities, snapshot, roster, delta, debug, .. } = &mut *self;
            let ctx = UpdateContext {
                delta: *delta,
                input: &*snapshot,
                players: &*roster,
                debug: *debug,
            };
            for entry in entities.iter_mut() {
                if !entry.entity.should_remove() {
                    entry.entity.update(&ctx);
                }
            }
        }

        self.sweep_removed();
        self.reconcile_controllers();
    }

    fn sweep_removed(&mut self) {
        for index in (0..self.entities.len()).rev() {
            if self.entities[index].entity.should_remove() {
                let removed = self.entities.remove(index);
                self.collidables.retain(|&id| id != removed.id);
                self.players.retain(|&id| id != removed.id);
                if self.director == Some(removed.id) {
                    self.director = None;
                }
                self.bindings.unregister(removed.id);
                debug!("Removed entity {}", removed.id);
            }
        }
    }

    /// Publishes each agent's (index, score, autonomous) for this tick.
    fn refresh_roster(&mut self) {
        let Self { entities, players, roster, .. } = &mut *self;
        roster.clear();
        for &id in players.iter() {
            let agent = entities
                .iter()
                .find(|e| e.id == id)
                .and_then(|e| e.entity.as_player());
            if let Some(agent) = agent {
                roster.push(PlayerStatus {
                    index: agent.player_index(),
                    score: agent.score(),
                    autonomous: agent.is_autonomous(),
                });
            }
        }
    }

    /// Unifies controller input with keyboard input.
    ///
    /// An agent with a live gamepad at its slot gets all five control
    /// flags written from the pad (axis past ±0.5 steers left/right).
    /// An agent with neither a gamepad nor a keyboard layout has no live
    /// input source and is switched to autonomous control.
    fn reconcile_controllers(&mut self) {
        let Self { entities, players, gamepads, .. } = &mut *self;

        for &id in players.iter() {
            let agent = entities
                .iter_mut()
                .find(|e| e.id == id)
                .and_then(|e| e.entity.as_player_mut());
            let Some(agent) = agent else { continue };

            let pad = gamepads
                .as_mut()
                .and_then(|provider| provider.sample(agent.player_index()));

            match pad {
                Some(pad) => {
                    let controls = agent.controls_mut();
                    controls.jump = pad.jump;
                    controls.left = pad.steers_left();
                    controls.right = pad.steers_right();
                    controls.attack = pad.attack;
                    controls.run = pad.run;
                }
                None => {
                    if agent.bindings().is_none() && !agent.is_autonomous() {
                        info!(
                            "Player {} has no live input source, autonomous control engaged",
                            agent.player_index()
                        );
                        agent.set_autonomous(true);
                    }
                }
            }
        }
    }

    //--- Draw Pass --------------------------------------------------------

    /// Clears the surface and paints every entity in list order.
    ///
    /// While the director reports scene-transition mode, only
    /// Background- and Director-kind entities paint, so round content
    /// cannot bleed through between scenes. Each entity's paint calls
    /// are bracketed in `save`/`restore`, keeping style mutations from
    /// leaking to siblings.
    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.clear();

        let in_transition = self
            .director
            .and_then(|id| self.entities.iter().find(|e| e.id == id))
            .and_then(|entry| entry.entity.as_director())
            .map_or(false, |director| director.in_transition());

        for entry in &self.entities {
            if in_transition
                && !matches!(
                    entry.entity.kind(),
                    EntityKind::Background | EntityKind::Director
                )
            {
                continue;
            }
            surface.save();
            entry.entity.draw(surface);
            surface.restore();
        }
    }

    //--- Frame Drivers ----------------------------------------------------

    /// The per-frame driver for real hosts: wall-clock delta.
    ///
    /// Pumps the event channel first, so the pause toggle is always
    /// observed, then no-ops while paused. A paused tick performs no
    /// side effects, so nothing needs rolling back on resume.
    pub fn frame(&mut self, surface: &mut dyn RenderSurface) {
        self.pump_events();
        if self.paused {
            return;
        }
        self.delta = self.clock.tick();
        self.advance_frame(surface);
    }

    /// Fixed-step driver for tests and headless hosts.
    ///
    /// `raw_delta` passes through the clock's clamp exactly like a wall
    /// sample would.
    pub fn frame_fixed(&mut self, raw_delta: f64, surface: &mut dyn RenderSurface) {
        self.pump_events();
        if self.paused {
            return;
        }
        self.delta = self.clock.advance(raw_delta);
        self.advance_frame(surface);
    }

    fn advance_frame(&mut self, surface: &mut dyn RenderSurface) {
        self.update();
        self.draw(surface);
        // Each discrete input event is observed by exactly one tick.
        self.snapshot.clear_one_shot();
    }

    /// Propagates reset to every entity in the master list.
    pub fn reset(&mut self) {
        for entry in self.entities.iter_mut() {
            entry.entity.reset();
        }
    }

    //--- Accessors --------------------------------------------------------

    /// The per-tick input snapshot.
    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    /// The simulation clock.
    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// True while the pause toggle is engaged.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True while the debug toggle is engaged.
    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    /// Entities in the master list.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Entities registered for collision consideration.
    pub fn collidable_count(&self) -> usize {
        self.collidables.len()
    }

    /// Registered player agents.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Ids in master-list order.
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().map(|entry| entry.id)
    }

    /// Looks up an entity by id.
    pub fn entity(&self, id: EntityId) -> Option<&dyn Entity> {
        self.entities
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.entity.as_ref())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
