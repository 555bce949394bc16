use std::collections::{HashSet, VecDeque};
use std::io::{self, Cursor, Read};

use rand::rngs::StdRng;
use rand::SeedableRng;

use touch_trails::core::touch::{ABS_MT_POSITION_X, ABS_MT_POSITION_Y, BTN_TOUCH, EV_ABS, EV_KEY};
use touch_trails::core::{
    Canvas, DisplayContext, DrawOp, Error, RawInputEvent, ShutdownToken, SplatRate,
    SplatterGenerator, TouchDecoder, TouchState,
};
use touch_trails::display::{Display, FrameSink, Framebuffer};
use touch_trails::scenes::{BouncingBall, TrailsScene};
use touch_trails::{LoopState, RenderLoop};

const SEED: u64 = 42;

fn touch_stream(x: i32, y: i32) -> Cursor<Vec<u8>> {
    let events = [
        RawInputEvent::new(EV_ABS, ABS_MT_POSITION_X, x),
        RawInputEvent::new(EV_ABS, ABS_MT_POSITION_Y, y),
        RawInputEvent::new(EV_KEY, BTN_TOUCH, 1),
    ];
    Cursor::new(events.iter().flat_map(|e| e.to_le_bytes()).collect())
}

fn trails(ctx: DisplayContext) -> Box<TrailsScene<StdRng>> {
    let splatter = SplatterGenerator::new(ctx, StdRng::seed_from_u64(SEED), SplatRate::default());
    Box::new(TrailsScene::new(splatter))
}

/// Sink that records every frame it is handed
#[derive(Default)]
struct Recorder {
    frames: Vec<Vec<u8>>,
}

impl FrameSink for Recorder {
    fn present(&mut self, frame: &[u8]) -> io::Result<()> {
        self.frames.push(frame.to_vec());
        Ok(())
    }
}

/// Touch source: one EINTR, a press, then a hard read error
struct FlakyInput {
    steps: VecDeque<io::Result<Vec<u8>>>,
}

impl FlakyInput {
    fn new(x: i32, y: i32) -> Self {
        let mut steps = VecDeque::new();
        steps.push_back(Err(io::Error::from(io::ErrorKind::Interrupted)));
        for record in touch_stream(x, y).into_inner().chunks(16) {
            steps.push_back(Ok(record.to_vec()));
        }
        steps.push_back(Err(io::Error::new(io::ErrorKind::Other, "device unplugged")));
        Self { steps }
    }
}

impl Read for FlakyInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.steps.pop_front() {
            Some(Ok(record)) => {
                buf[..record.len()].copy_from_slice(&record);
                Ok(record.len())
            }
            Some(Err(e)) => Err(e),
            None => Err(io::Error::from(io::ErrorKind::WouldBlock)),
        }
    }
}

/// Sink that never accepts a frame
struct Dead;

impl FrameSink for Dead {
    fn present(&mut self, _frame: &[u8]) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }
}

#[test]
fn test_splatter_positions_stay_clamped() {
    let ctx = DisplayContext::reference();
    let mut gen = SplatterGenerator::new(ctx, StdRng::seed_from_u64(SEED), SplatRate::default());

    // Touches near every edge and corner, plus the centre
    let spots = [(0, 0), (799, 479), (0, 479), (799, 0), (400, 240), (-100, 900), (3, 240)];
    for i in 0..1000 {
        let (x, y) = spots[i % spots.len()];
        let ops = gen.generate(&TouchState::new(x, y, true), 0.0);
        assert_eq!(ops.len(), 3);

        for op in ops {
            let DrawOp::FilledCircle { cx, cy, radius, .. } = op else {
                panic!("unexpected op {:?}", op);
            };
            assert!(cx >= radius && cx <= 800 - radius - 1, "x={} r={}", cx, radius);
            assert!(cy >= radius && cy <= 480 - radius - 1, "y={} r={}", cy, radius);
        }
    }
}

#[test]
fn test_one_frame_end_to_end() {
    let ctx = DisplayContext::new(800, 480, 3200).unwrap();
    let framebuffer = Framebuffer::new(Cursor::new(Vec::new()), &ctx);

    let mut render_loop = RenderLoop::new(
        Canvas::new(ctx),
        Display::new(framebuffer, 30),
        Some(TouchDecoder::new(touch_stream(400, 240))),
        trails(ctx),
        ShutdownToken::new(),
    );
    render_loop.start();
    render_loop.step().unwrap();

    assert_eq!(*render_loop.touch(), TouchState::new(400, 240, true));

    let written = render_loop.display().unwrap().sink().get_ref().get_ref().clone();
    assert_eq!(written.len(), 3200 * 480);

    // Replay the same random stream to learn which pixels were stamped
    let mut replay = SplatterGenerator::new(ctx, StdRng::seed_from_u64(SEED), SplatRate::default());
    let ops = replay.generate(&TouchState::new(400, 240, true), 0.0);
    let mut expected = Canvas::new(ctx);
    let mut stamped = HashSet::new();
    for op in &ops {
        expected.apply(op);
        if let DrawOp::FilledCircle { cx, cy, radius, .. } = *op {
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx * dx + dy * dy <= radius * radius {
                        stamped.insert(ctx.offset(cx + dx, cy + dy).unwrap());
                    }
                }
            }
        }
    }

    assert_eq!(written, expected.export_bytes());

    let changed: HashSet<usize> = written
        .chunks_exact(4)
        .enumerate()
        .filter(|(_, px)| px.iter().any(|&b| b != 0))
        .map(|(i, _)| i * 4)
        .collect();
    assert_eq!(changed, stamped);
}

#[test]
fn test_decay_applied_after_write() {
    let ctx = DisplayContext::new(64, 64, 256).unwrap();
    let mut render_loop = RenderLoop::new(
        Canvas::new(ctx),
        Display::new(Recorder::default(), 30),
        Some(TouchDecoder::new(touch_stream(32, 32))),
        trails(ctx),
        ShutdownToken::new(),
    );
    render_loop.start();
    render_loop.step().unwrap();

    let frame = &render_loop.display().unwrap().sink().frames[0];
    let canvas = render_loop.canvas().export_bytes();
    for (&shown, &now) in frame.iter().zip(canvas) {
        assert_eq!(now, shown.saturating_sub(1));
    }
}

#[test]
fn test_input_read_error_does_not_drop_frame() {
    let ctx = DisplayContext::new(64, 64, 256).unwrap();
    let mut render_loop = RenderLoop::new(
        Canvas::new(ctx),
        Display::new(Recorder::default(), 30),
        Some(TouchDecoder::new(FlakyInput::new(20, 30))),
        trails(ctx),
        ShutdownToken::new(),
    );
    render_loop.start();

    let frame = render_loop.step().unwrap();
    assert_eq!(frame.number, 0);
    // The interrupted read was retried and the press behind it applied
    assert_eq!(*render_loop.touch(), TouchState::new(20, 30, true));

    let frames = &render_loop.display().unwrap().sink().frames;
    assert_eq!(frames.len(), 1);
    assert!(frames[0].iter().any(|&b| b != 0));

    // Later frames keep rendering from the last known state
    render_loop.step().unwrap();
    assert_eq!(render_loop.display().unwrap().sink().frames.len(), 2);
    assert_eq!(render_loop.state(), LoopState::Running);
}

#[test]
fn test_without_touch_device_nothing_is_drawn() {
    let ctx = DisplayContext::new(32, 32, 128).unwrap();
    let mut render_loop: RenderLoop<Recorder, Cursor<Vec<u8>>> = RenderLoop::new(
        Canvas::new(ctx),
        Display::new(Recorder::default(), 30),
        None,
        trails(ctx),
        ShutdownToken::new(),
    );
    render_loop.start();
    for _ in 0..5 {
        render_loop.step().unwrap();
    }

    let frames = &render_loop.display().unwrap().sink().frames;
    assert_eq!(frames.len(), 5);
    assert!(frames.iter().all(|f| f.iter().all(|&b| b == 0)));
    assert!(!render_loop.touch().contact());
}

#[test]
fn test_cancelled_token_stops_at_frame_boundary() {
    let ctx = DisplayContext::new(16, 16, 64).unwrap();
    let token = ShutdownToken::new();
    let mut render_loop: RenderLoop<Recorder, Cursor<Vec<u8>>> = RenderLoop::new(
        Canvas::new(ctx),
        Display::new(Recorder::default(), 30),
        Some(TouchDecoder::new(touch_stream(8, 8))),
        trails(ctx),
        token.clone(),
    );
    assert_eq!(render_loop.state(), LoopState::Starting);

    token.cancel();
    let frames = render_loop.run().unwrap();

    assert_eq!(frames, 0);
    assert_eq!(render_loop.frame_count(), 0);
    assert_eq!(render_loop.state(), LoopState::Stopped);
    // Stopping hands the devices back
    assert!(render_loop.display().is_none());
}

#[test]
fn test_dead_display_is_fatal() {
    let ctx = DisplayContext::new(16, 16, 64).unwrap();
    let mut render_loop: RenderLoop<Dead, Cursor<Vec<u8>>> = RenderLoop::new(
        Canvas::new(ctx),
        Display::new(Dead, 4),
        None,
        Box::new(BouncingBall::new(ctx)),
        ShutdownToken::new(),
    );

    let err = render_loop.run().unwrap_err();
    assert!(matches!(err, Error::FatalWrite { failures: 4, .. }));
    assert_eq!(render_loop.state(), LoopState::Stopped);
    assert!(render_loop.display().is_none());
    // The three transient failures still advanced the frame counter
    assert_eq!(render_loop.frame_count(), 3);
}

#[test]
fn test_ball_scene_frames() {
    let ctx = DisplayContext::reference();
    let mut render_loop: RenderLoop<Recorder, Cursor<Vec<u8>>> = RenderLoop::new(
        Canvas::new(ctx),
        Display::new(Recorder::default(), 30),
        None,
        Box::new(BouncingBall::new(ctx)),
        ShutdownToken::new(),
    );
    render_loop.start();
    render_loop.step().unwrap();

    let frame = &render_loop.display().unwrap().sink().frames[0];
    let centre = ctx.offset(403, 242).unwrap();
    assert_eq!(&frame[centre..centre + 4], &[0, 255, 0, 0]);
    assert_eq!(&frame[0..4], &[0, 0, 0, 0]);
}
