use std::io::Read;
use std::time::Instant;

use log::{debug, info, warn};

use crate::core::{
    Canvas, Clock, FpsMeter, FrameCap, FrameInfo, Result, ShutdownToken, TouchDecoder,
    TouchState,
};
use crate::display::{Display, FrameSink};
use crate::scenes::Scene;

/// Seconds between FPS reports
pub const FPS_REPORT_INTERVAL: f32 = 2.0;

/// Lifecycle of the render loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Starting,
    Running,
    Stopping,
    Stopped,
}

/// Real-time driver: input -> scene -> display, one frame per iteration
pub struct RenderLoop<S: FrameSink, R: Read> {
    state: LoopState,
    canvas: Canvas,
    display: Option<Display<S>>,
    input: Option<TouchDecoder<R>>,
    touch: TouchState,
    scene: Box<dyn Scene>,
    shutdown: ShutdownToken,
    clock: Clock,
    fps: FpsMeter,
    frame_cap: Option<FrameCap>,
    last_delta: f32,
}

impl<S: FrameSink, R: Read> RenderLoop<S, R> {
    pub fn new(
        canvas: Canvas,
        display: Display<S>,
        input: Option<TouchDecoder<R>>,
        scene: Box<dyn Scene>,
        shutdown: ShutdownToken,
    ) -> Self {
        Self {
            state: LoopState::Starting,
            canvas,
            display: Some(display),
            input,
            touch: TouchState::default(),
            scene,
            shutdown,
            clock: Clock::new(),
            fps: FpsMeter::new(FPS_REPORT_INTERVAL),
            frame_cap: None,
            last_delta: 0.0,
        }
    }

    /// Cap the frame rate; unthrottled when `None`
    pub fn with_frame_cap(mut self, cap: Option<FrameCap>) -> Self {
        self.frame_cap = cap;
        self
    }

    /// Starting -> Running: initial canvas state
    pub fn start(&mut self) {
        if self.state != LoopState::Starting {
            return;
        }
        if self.input.is_none() && self.scene.uses_touch() {
            warn!("no touch input, contact stays off");
        }
        self.scene.start(&mut self.canvas);
        self.state = LoopState::Running;
        info!("render loop running");
    }

    /// Render one frame. Only `FatalWrite` is returned as an error;
    /// everything else is logged and the frame completes.
    pub fn step(&mut self) -> Result<FrameInfo> {
        let frame_start = Instant::now();

        self.poll_input();
        self.scene.draw(&mut self.canvas, &self.touch, self.last_delta);

        // Transient failures were already logged by the display
        if let Some(display) = self.display.as_mut() {
            if let Err(e) = display.write_frame(self.canvas.export_bytes()) {
                if e.is_fatal() {
                    return Err(e);
                }
            }
        }

        self.scene.after_present(&mut self.canvas);

        if let Some(cap) = &self.frame_cap {
            cap.wait(frame_start);
        }

        let frame = self.clock.tick();
        self.last_delta = frame.delta;
        if let Some(fps) = self.fps.tick(frame.delta) {
            info!("FPS: {:.1}", fps);
        }
        Ok(frame)
    }

    /// Run until the shutdown token fires or the display dies.
    /// Returns the number of frames rendered; a fatal write is returned
    /// to the caller, which reports it.
    pub fn run(&mut self) -> Result<u64> {
        self.start();

        let mut outcome = Ok(());
        while self.state == LoopState::Running {
            if self.shutdown.is_cancelled() {
                info!("shutdown requested");
                self.state = LoopState::Stopping;
                break;
            }
            if let Err(e) = self.step() {
                outcome = Err(e);
                self.state = LoopState::Stopping;
            }
        }

        self.stop();
        outcome.map(|_| self.clock.frame_count())
    }

    /// Stopping -> Stopped: release the input and display devices
    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.state = LoopState::Stopping;
        if self.input.take().is_some() {
            debug!("touch input released");
        }
        if self.display.take().is_some() {
            debug!("display released");
        }
        self.state = LoopState::Stopped;
        info!("render loop stopped after {} frames", self.clock.frame_count());
    }

    fn poll_input(&mut self) {
        let Some(input) = self.input.as_mut() else {
            return;
        };
        if let Err(e) = input.poll(&mut self.touch) {
            warn!("touch: {}", e);
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn touch(&self) -> &TouchState {
        &self.touch
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// None once the loop has stopped
    pub fn display(&self) -> Option<&Display<S>> {
        self.display.as_ref()
    }

    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }
}
