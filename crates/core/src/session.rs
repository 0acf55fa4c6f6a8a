//! Session module - the live game
//!
//! A session owns the grid, the active piece and the drop timer. Every
//! public operation takes the session mutex for its whole duration, so the
//! timer thread and input handlers never observe a half-moved piece.
//!
//! # Turn sequence
//!
//! On every timer tick the active piece moves down one row. When it cannot,
//! it has landed: full rows are removed (re-testing the same index after each
//! removal, since the rows above shift into it), a new piece spawns at the
//! spawn point, and if that piece already overlaps the field the game ends.
//!
//! # Timer
//!
//! The drop timer is a dedicated thread sleeping on a channel. Dropping the
//! sender cancels it. Each timer carries the epoch it was started in; a tick
//! that wakes up after its timer was cancelled sees a newer epoch under the
//! lock and does nothing.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, error, info, trace, warn};

use crate::config::{ConfigError, SessionConfig};
use crate::grid::{CellObserver, Grid, PieceId};
use crate::piece::{Footprint, Piece};
use crate::rng::ShapePicker;
use crate::shapes::shape;
use crate::types::{Command, ShapeKind};

/// Whether the drop timer is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Running,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No active piece
    Idle,
    /// The active piece moved down one row
    Dropped,
    /// The piece landed and a new one was placed
    Spawned { cleared: usize },
    /// The piece landed and its successor collided on spawn
    GameOver { cleared: usize },
}

struct DropTimer {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

impl DropTimer {
    fn spawn(inner: Weak<Inner>, epoch: u64, period: Duration) -> io::Result<Self> {
        let (stop, stopped) = mpsc::channel();
        let handle = thread::Builder::new()
            .name(format!("drop-timer-{}", epoch))
            .spawn(move || run_timer(inner, epoch, period, stopped))?;
        Ok(Self { stop, handle })
    }

    /// Signal the thread to stop and hand back its handle
    fn cancel(self) -> JoinHandle<()> {
        drop(self.stop);
        self.handle
    }
}

fn run_timer(inner: Weak<Inner>, epoch: u64, period: Duration, stopped: Receiver<()>) {
    let mut deadline = Instant::now() + period;
    loop {
        let wait = deadline.saturating_duration_since(Instant::now());
        match stopped.recv_timeout(wait) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
        deadline += period;

        let Some(inner) = inner.upgrade() else {
            break;
        };
        if !inner.scheduled_tick(epoch) {
            break;
        }
    }
    trace!("drop timer {} stopped", epoch);
}

/// Join a cancelled timer thread unless it is the calling thread
fn join_stale(handle: Option<JoinHandle<()>>) {
    let Some(handle) = handle else {
        return;
    };
    if handle.thread().id() == thread::current().id() {
        return;
    }
    if handle.join().is_err() {
        warn!("drop timer thread panicked");
    }
}

/// Everything the session mutex protects
struct State {
    grid: Grid,
    active: Option<Piece>,
    picker: ShapePicker,
    next_id: u32,
    /// Bumped on every timer cancellation
    epoch: u64,
    timer: Option<DropTimer>,
}

impl State {
    fn spawn(&mut self, (x, y): (i32, i32)) -> Piece {
        self.next_id = self.next_id.wrapping_add(1);
        let kind = self.picker.pick();
        debug!("spawning {:?} piece #{} at ({}, {})", kind, self.next_id, x, y);
        shape(kind).build(PieceId(self.next_id), x, y)
    }

    fn cancel_timer(&mut self) -> Option<JoinHandle<()>> {
        self.epoch = self.epoch.wrapping_add(1);
        self.timer.take().map(DropTimer::cancel)
    }

    fn reset(&mut self) -> Option<JoinHandle<()>> {
        self.grid.clear_all();
        self.active = None;
        self.cancel_timer()
    }

    /// Remove every full row, scanning bottom to top
    fn delete_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = 0;
        while y < self.grid.rows() {
            if self.grid.is_row_full(y) {
                // The row above has moved into `y`, test it again.
                self.grid.remove_row(y);
                cleared += 1;
            } else {
                y += 1;
            }
        }
        if cleared > 0 {
            debug!("cleared {} full row(s)", cleared);
        }
        cleared
    }

    fn tick(&mut self, spawn: (i32, i32)) -> (TickOutcome, Option<JoinHandle<()>>) {
        let Some(piece) = self.active.as_mut() else {
            return (TickOutcome::Idle, None);
        };
        if piece.move_down(&mut self.grid) {
            return (TickOutcome::Dropped, None);
        }

        let cleared = self.delete_full_rows();
        let next = self.spawn(spawn);
        let collided = next.has_collision(&self.grid);
        // Drawn either way so the final field shows the blocking piece.
        next.put(&mut self.grid);

        if collided {
            info!("game over: {:?} piece collided at spawn", next.kind());
            self.active = None;
            (TickOutcome::GameOver { cleared }, self.cancel_timer())
        } else {
            self.active = Some(next);
            (TickOutcome::Spawned { cleared }, None)
        }
    }
}

struct Inner {
    config: SessionConfig,
    spawn: (i32, i32),
    state: Mutex<State>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Tick on behalf of the timer started in `epoch`
    ///
    /// Returns false when that timer should stop.
    fn scheduled_tick(&self, epoch: u64) -> bool {
        let mut state = self.lock();
        if state.epoch != epoch {
            return false;
        }
        // On game over the returned handle is this thread's own; dropping it detaches.
        let (outcome, _) = state.tick(self.spawn);
        !matches!(outcome, TickOutcome::GameOver { .. })
    }
}

/// A game session
///
/// Cheap operations only: every method holds the lock for O(rows x columns)
/// work at most and never blocks on anything else while holding it.
pub struct Session {
    inner: Arc<Inner>,
}

impl Session {
    /// Create an idle session without a cell observer
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.columns, config.rows);
        Ok(Self::from_parts(config, grid))
    }

    /// Create an idle session whose grid reports every cell change to `observer`
    ///
    /// The observer runs on whichever thread performs the mutation (the
    /// timer thread or the caller of a command) while the session lock is
    /// held, so it must not call back into the session.
    pub fn with_observer(
        config: SessionConfig,
        observer: impl CellObserver + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::with_observer(config.columns, config.rows, observer);
        Ok(Self::from_parts(config, grid))
    }

    fn from_parts(config: SessionConfig, grid: Grid) -> Self {
        let spawn = config.spawn_point();
        let picker = ShapePicker::new(config.seed);
        Self {
            inner: Arc::new(Inner {
                config,
                spawn,
                state: Mutex::new(State {
                    grid,
                    active: None,
                    picker,
                    next_id: 0,
                    epoch: 0,
                    timer: None,
                }),
            }),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Clear the field, spawn the first piece and start the drop timer
    ///
    /// Restarts a running game.
    pub fn start(&self) {
        let stale = {
            let mut state = self.inner.lock();
            let stale = state.reset();

            let piece = state.spawn(self.inner.spawn);
            piece.put(&mut state.grid);
            state.active = Some(piece);

            let epoch = state.epoch;
            let period = self.inner.config.drop_period;
            match DropTimer::spawn(Arc::downgrade(&self.inner), epoch, period) {
                Ok(timer) => state.timer = Some(timer),
                Err(err) => error!("failed to start drop timer: {}", err),
            }
            info!(
                "session started: {}x{} grid, drop every {:?}",
                self.inner.config.columns, self.inner.config.rows, period
            );
            stale
        };
        join_stale(stale);
    }

    /// Run one drop step, exactly as the timer does
    pub fn tick(&self) -> TickOutcome {
        let (outcome, stale) = self.inner.lock().tick(self.inner.spawn);
        join_stale(stale);
        outcome
    }

    /// Empty the field, drop the active piece and stop the timer
    pub fn clear(&self) {
        let stale = self.inner.lock().reset();
        join_stale(stale);
    }

    /// Dispatch a command from the input layer
    pub fn apply(&self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::RotateLeft => self.rotate_left(),
            Command::RotateRight => self.rotate_right(),
            Command::FallDown => self.fall_down(),
            Command::Start => {
                self.start();
                true
            }
        }
    }

    pub fn move_left(&self) -> bool {
        self.with_active(Command::MoveLeft, |piece, grid| piece.move_left(grid))
    }

    pub fn move_right(&self) -> bool {
        self.with_active(Command::MoveRight, |piece, grid| piece.move_right(grid))
    }

    pub fn rotate_left(&self) -> bool {
        self.with_active(Command::RotateLeft, |piece, grid| piece.rotate_left(grid))
    }

    pub fn rotate_right(&self) -> bool {
        self.with_active(Command::RotateRight, |piece, grid| piece.rotate_right(grid))
    }

    pub fn fall_down(&self) -> bool {
        self.with_active(Command::FallDown, |piece, grid| piece.fall_down(grid))
    }

    fn with_active(&self, command: Command, op: impl FnOnce(&mut Piece, &mut Grid) -> bool) -> bool {
        let mut state = self.inner.lock();
        let State { grid, active, .. } = &mut *state;
        match active.as_mut() {
            Some(piece) => op(piece, grid),
            None => {
                trace!("{} ignored: no active piece", command.as_str());
                false
            }
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.inner.lock().timer.is_some() {
            SessionStatus::Running
        } else {
            SessionStatus::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.status() == SessionStatus::Running
    }

    pub fn has_active_piece(&self) -> bool {
        self.inner.lock().active.is_some()
    }

    pub fn active_kind(&self) -> Option<ShapeKind> {
        self.inner.lock().active.as_ref().map(Piece::kind)
    }

    /// Absolute cells of the active piece
    pub fn active_cells(&self) -> Option<Footprint> {
        self.inner.lock().active.as_ref().map(Piece::cells)
    }

    /// Textual dump of the field, top row first
    pub fn render(&self) -> String {
        self.inner.lock().grid.to_string()
    }

    /// Read the grid under the session lock
    pub fn with_grid<R>(&self, f: impl FnOnce(&Grid) -> R) -> R {
        f(&self.inner.lock().grid)
    }

    /// Modify the grid under the session lock
    ///
    /// Meant for presets and tests. Touching the cells of the active piece
    /// breaks the piece's view of its own footprint.
    pub fn with_grid_mut<R>(&self, f: impl FnOnce(&mut Grid) -> R) -> R {
        f(&mut self.inner.lock().grid)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let stale = self.inner.lock().cancel_timer();
        join_stale(stale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::PieceRef;
    use crate::types::Color;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const FILLER: PieceRef = PieceRef {
        id: PieceId(u32::MAX),
        color: Color::Red,
    };

    fn session(columns: u16, rows: u16) -> Session {
        Session::new(SessionConfig::new(columns, rows).with_seed(42)).unwrap()
    }

    /// Make `piece` the active piece without starting the timer
    fn place(session: &Session, piece: Piece) {
        let mut state = session.inner.lock();
        piece.put(&mut state.grid);
        state.active = Some(piece);
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = session(4, 4);
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(!session.has_active_piece());
        assert_eq!(session.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(matches!(
            Session::new(SessionConfig::new(0, 4)),
            Err(ConfigError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn test_start_spawns_and_runs() {
        let session = session(10, 20);
        session.start();

        assert_eq!(session.status(), SessionStatus::Running);
        let kind = session.active_kind().unwrap();
        assert_eq!(shape(kind).offsets.len(), 4);
        let pivot = session.inner.lock().active.as_ref().map(Piece::pivot);
        assert_eq!(pivot, Some((5, 18)));
        session.clear();
    }

    #[test]
    fn test_clear_stops_everything() {
        let session = session(10, 20);
        session.start();
        session.clear();

        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(!session.has_active_piece());
        assert!(session.render().chars().all(|c| c == '.' || c == '\n'));
    }

    #[test]
    fn test_tick_moves_active_piece_down() {
        let session = session(4, 4);
        place(&session, shape(ShapeKind::O).build(PieceId(100), 1, 2));

        assert_eq!(session.tick(), TickOutcome::Dropped);
        assert_eq!(session.render(), "....\n.XX.\n.XX.\n....\n");
    }

    #[test]
    fn test_landing_clears_stacked_full_rows() {
        let session = session(4, 4);
        session.with_grid_mut(|grid| {
            for y in 0..2 {
                grid.put(0, y, FILLER);
                grid.put(1, y, FILLER);
            }
            grid.put(0, 2, FILLER);
        });
        place(&session, shape(ShapeKind::O).build(PieceId(100), 2, 0));

        // Rows 0 and 1 are full; after removing row 0, row 1 drops into it and
        // must be caught by the same scan.
        let outcome = session.tick();
        assert_eq!(outcome, TickOutcome::Spawned { cleared: 2 });

        let leftover = session.with_grid(|grid| grid.get(0, 0));
        assert_eq!(leftover, Some(FILLER));
        assert!(session.has_active_piece());
    }

    #[test]
    fn test_game_over_when_spawn_is_blocked() {
        let config = SessionConfig::new(4, 4)
            .with_seed(42)
            .with_drop_period(Duration::from_secs(60));
        let session = Session::new(config).unwrap();
        session.start();
        assert!(session.is_running());

        // Park a square on the floor and block the spawn point; every shape
        // contains its pivot, so whatever spawns next collides.
        {
            let mut state = session.inner.lock();
            state.grid.clear_all();
            state.active = None;
        }
        place(&session, shape(ShapeKind::O).build(PieceId(100), 0, 0));
        let (x, y) = session.config().spawn_point();
        session.with_grid_mut(|grid| grid.put(x, y, FILLER));

        let outcome = session.tick();
        assert_eq!(outcome, TickOutcome::GameOver { cleared: 0 });
        assert!(!session.has_active_piece());
        assert_eq!(session.status(), SessionStatus::Idle);
        // The colliding piece is still drawn.
        assert_ne!(session.with_grid(|grid| grid.get(x, y)), Some(FILLER));
    }

    #[test]
    fn test_commands_without_piece_are_noops() {
        let session = session(4, 4);
        assert!(!session.move_left());
        assert!(!session.move_right());
        assert!(!session.rotate_left());
        assert!(!session.rotate_right());
        assert!(!session.fall_down());
        assert_eq!(session.render(), "....\n....\n....\n....\n");
    }

    #[test]
    fn test_commands_forward_to_active_piece() {
        let session = session(4, 3);
        place(&session, shape(ShapeKind::O).build(PieceId(100), 1, 0));

        assert!(session.apply(Command::MoveRight));
        assert_eq!(session.render(), "....\n..XX\n..XX\n");
        assert!(!session.apply(Command::MoveRight));
        assert!(session.apply(Command::MoveLeft));
        assert!(session.apply(Command::RotateLeft));
        assert_eq!(session.render(), "....\n.XX.\n.XX.\n");
    }

    #[test]
    fn test_stale_timer_epoch_does_not_tick() {
        let session = session(4, 4);
        place(&session, shape(ShapeKind::O).build(PieceId(100), 1, 2));
        let epoch = session.inner.lock().epoch;
        let _ = session.inner.lock().cancel_timer();

        assert!(!session.inner.scheduled_tick(epoch));
        assert_eq!(session.render(), ".XX.\n.XX.\n....\n....\n");
    }

    #[test]
    fn test_timer_drives_the_piece() {
        let config = SessionConfig::new(10, 20)
            .with_seed(7)
            .with_drop_period(Duration::from_millis(5));
        let changes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&changes);
        let session = Session::with_observer(config, move |_x: i32, _y: i32| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        session.start();
        let start = session.active_cells();
        let deadline = Instant::now() + Duration::from_secs(5);
        while session.active_cells() == start && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        let moved = session.active_cells() != start;
        session.clear();

        assert!(moved);
        assert!(changes.load(Ordering::SeqCst) > 0);
        assert_eq!(session.status(), SessionStatus::Idle);
    }
}
