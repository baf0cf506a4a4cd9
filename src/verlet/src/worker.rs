use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;

use crate::engine::Engine;
use crate::time_manager::TimeManager;
use protocol::{Command, Message};

pub struct Worker {
	engine: Option<Engine>,
	clock: TimeManager,

	// -1: always play
	// 0: pause
	// n: play n frames
	forward_frames: i32,
}

impl Default for Worker {
	fn default() -> Self {
		Self {
			engine: None,
			clock: TimeManager::default(),
			forward_frames: -1,
		}
	}
}

enum Flow {
	Continue,
	Stop,
}

impl Worker {
	pub fn with_clock(mut self, clock: TimeManager) -> Self {
		self.clock = clock;
		self
	}

	fn reject(tx: &Sender<Message>, reason: String) {
		tracing::warn!("rejected: {}", reason);
		let _ = tx.send(Message::Rejected(reason));
	}

	fn handle(&mut self, cmd: Command, tx: &Sender<Message>) -> Flow {
		match cmd {
			Command::Start { config, objects } => {
				let mut engine = match Engine::new(config) {
					Ok(engine) => engine,
					Err(e) => {
						Self::reject(tx, e.to_string());
						return Flow::Continue;
					}
				};
				for req in objects.iter() {
					if let Err(e) = engine.spawn(req) {
						Self::reject(tx, e.to_string());
					}
				}
				if self.engine.is_some() {
					tracing::info!("restarting simulation");
				}
				self.engine = Some(engine);
				self.forward_frames = -1;
				self.clock.reset();
			}
			Command::AddBody(req) => match self.engine.as_mut() {
				Some(engine) => {
					if let Err(e) = engine.spawn(&req) {
						Self::reject(tx, e.to_string());
					}
				}
				None => Self::reject(tx, "no simulation running".into()),
			},
			Command::TogglePause => {
				if self.forward_frames == 0 {
					self.forward_frames = -1;
					if let Some(engine) = self.engine.as_mut() {
						engine.resume();
					}
				} else {
					self.forward_frames = 0;
				}
			}
			Command::FrameForward => {
				if self.forward_frames == 0 {
					self.forward_frames = 1;
					if let Some(engine) = self.engine.as_mut() {
						engine.resume();
					}
				}
			}
			Command::Stop => return Flow::Stop,
		}
		Flow::Continue
	}

	fn advance(&mut self) {
		let due = self.clock.take_steps();
		let engine = match self.engine.as_mut() {
			Some(engine) => engine,
			None => return,
		};
		let steps = match self.forward_frames {
			-1 => due,
			n => n.max(0) as usize,
		};
		let dt = self.clock.dt();
		for _ in 0..steps {
			engine.step(dt);
			if engine.is_paused() {
				break;
			}
		}
		if self.forward_frames > 0 || engine.is_paused() {
			self.forward_frames = 0;
		}
	}

	pub fn run_thread(&mut self, tx: Sender<Message>, rx: Receiver<Command>) {
		if tx.send(Message::Ready).is_err() {
			return;
		}
		loop {
			if self.engine.is_none() {
				match rx.recv() {
					Ok(cmd) => {
						if let Flow::Stop = self.handle(cmd, &tx) {
							break;
						}
					}
					Err(_) => break,
				}
				continue;
			}

			loop {
				match rx.try_recv() {
					Ok(cmd) => {
						if let Flow::Stop = self.handle(cmd, &tx) {
							tracing::info!("worker stopped");
							return;
						}
					}
					Err(TryRecvError::Empty) => break,
					Err(TryRecvError::Disconnected) => return,
				}
			}

			self.advance();
			if let Some(engine) = self.engine.as_ref() {
				if tx.send(Message::State(engine.snapshot())).is_err() {
					break;
				}
			}
			self.clock.wait();
		}
		tracing::info!("worker stopped");
	}
}

/// Runs a simulation on its own thread. The first message is always `Ready`;
/// after `Start` one `State` follows per frame.
pub fn spawn() -> (Sender<Command>, Receiver<Message>, JoinHandle<()>) {
	spawn_with(Worker::default())
}

pub fn spawn_with(mut worker: Worker) -> (Sender<Command>, Receiver<Message>, JoinHandle<()>) {
	let (cmd_tx, cmd_rx) = mpsc::channel();
	let (msg_tx, msg_rx) = mpsc::channel();
	let handle = std::thread::spawn(move || worker.run_thread(msg_tx, cmd_rx));
	(cmd_tx, msg_rx, handle)
}
