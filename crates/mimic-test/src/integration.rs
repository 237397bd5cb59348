//! End-to-end pipeline validation
//!
//! Drives the full path a deployed bridge runs: simulated serial bytes
//! through the deframer, a stub predictor, the filter bank, calibration,
//! and out through a sink.

use rand::rngs::StdRng;
use rand::SeedableRng;

use mimic_core::{channel_index, AppConfig, MimicResult, Timestamp, CHANNEL_COUNT};
use mimic_framing::Frame;
use mimic_runtime::{ConfigStore, Pipeline, Predictor};
use mimic_transport::{BlendshapeSink, OscUdpSender};

use crate::{CaptureSink, Chunker, StreamSimulator};

/// Derives every channel from the first body byte of the frame, so the
/// expected output is computable from the simulated stream
struct BodyBytePredictor;

impl Predictor for BodyBytePredictor {
    fn predict(&mut self, frame: &Frame) -> MimicResult<Vec<f32>> {
        let level = frame.payload[3] as f32 / 255.0;
        Ok(vec![level; CHANNEL_COUNT])
    }
}

#[tokio::test]
async fn test_bytes_to_sink_end_to_end() {
    let mut sim = StreamSimulator::with_seed(42);
    sim.push_garbage(64)
        .push_frame(512)
        .push_garbage(16)
        .push_frame(512)
        .push_frame(512);

    let mut pipeline = Pipeline::new(AppConfig::default());
    let mut predictor = BodyBytePredictor;
    let mut sink = CaptureSink::new();
    let port = pipeline.config().osc_port;

    let mut rng = StdRng::seed_from_u64(1);
    let mut chunker = Chunker::new(sim.bytes());
    let mut t = 0.0;
    while let Some(chunk) = chunker.next_random(&mut rng, 96) {
        t += 0.01;
        for frame in pipeline.ingest_at(chunk, Timestamp::from_secs_f64(t)) {
            if let Some(update) = pipeline.process(&frame, &mut predictor) {
                sink.send(&update, port).await.unwrap();
            }
        }
    }

    assert_eq!(sink.sent.len(), 3);
    assert_eq!(pipeline.stats().frames_in, 3);
    assert_eq!(pipeline.stats().cycles_run, 3);

    // First cycle is a filter-bank first call: values pass through raw
    let expected = sim.expected_frames()[0][3] as f32 / 255.0;
    assert_eq!(sink.sent[0].1.values[0], expected);
}

#[test]
fn test_chunked_pipeline_matches_contiguous() {
    let mut sim = StreamSimulator::with_seed(5);
    sim.push_garbage(10)
        .push_frame(300)
        .push_frame(40)
        .push_garbage(3)
        .push_frame(2000);

    let mut whole = Pipeline::new(AppConfig::default());
    let expected: Vec<_> = whole
        .ingest_at(sim.bytes(), Timestamp::ZERO)
        .iter()
        .map(|f| (f.seq, f.payload.to_vec()))
        .collect();

    let mut chunked = Pipeline::new(AppConfig::default());
    let mut got = Vec::new();
    let mut chunker = Chunker::new(sim.bytes());
    while let Some(chunk) = chunker.next_fixed(1) {
        got.extend(
            chunked
                .ingest_at(chunk, Timestamp::ZERO)
                .iter()
                .map(|f| (f.seq, f.payload.to_vec())),
        );
    }

    assert_eq!(expected.len(), 3);
    assert_eq!(got, expected);
}

#[tokio::test]
async fn test_updates_arrive_over_udp() {
    let receiver = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = receiver.local_addr().unwrap().port();

    let mut sim = StreamSimulator::with_seed(9);
    sim.push_frame(128);

    let mut pipeline = Pipeline::new(AppConfig::default());
    let mut predictor = BodyBytePredictor;
    let mut sender = OscUdpSender::new();

    let frames = pipeline.ingest_at(sim.bytes(), Timestamp::ZERO);
    let update = pipeline.process(&frames[0], &mut predictor).unwrap();
    sender.send(&update, port).await.unwrap();

    let expected = sim.expected_frames()[0][3] as f32 / 255.0;
    let jaw_open = channel_index("jawOpen").unwrap();

    let mut buf = [0u8; 1024];
    let mut seen = 0;
    for _ in 0..CHANNEL_COUNT {
        let (len, _) = receiver.recv_from(&mut buf).await.unwrap();
        let packet = rosc_decode(&buf[..len]);
        if packet.0 == "/jawOpen" {
            assert_eq!(packet.1, update.values[jaw_open]);
            assert_eq!(packet.1, expected);
            seen += 1;
        }
    }
    assert_eq!(seen, 1);
}

/// Decode one OSC float message into (address, value)
fn rosc_decode(buf: &[u8]) -> (String, f32) {
    use rosc::{decoder, OscPacket, OscType};

    let (_, packet) = decoder::decode_udp(buf).unwrap();
    let OscPacket::Message(msg) = packet else {
        panic!("expected a message packet");
    };
    let value = match msg.args.as_slice() {
        [OscType::Float(v)] => *v,
        other => panic!("expected a single float argument, got {other:?}"),
    };
    (msg.addr, value)
}

#[test]
fn test_slow_inference_drops_late_frames() {
    let mut sim = StreamSimulator::with_seed(13);
    for _ in 0..5 {
        sim.push_frame(64);
    }

    let mut pipeline = Pipeline::new(AppConfig::default());
    let gate = pipeline.gate();
    let mut predictor = BodyBytePredictor;

    let frames = pipeline.ingest_at(sim.bytes(), Timestamp::ZERO);
    assert_eq!(frames.len(), 5);

    // Hold a cycle open across the first three frames, as if inference
    // for frame 1 were still running when 2 and 3 arrived
    let mut processed = 0;
    let mut guard = None;
    for (i, frame) in frames.iter().enumerate() {
        match gate.try_begin() {
            Some(g) => {
                pipeline.process(frame, &mut predictor).unwrap();
                processed += 1;
                if i == 0 {
                    guard = Some(g); // first cycle stays busy
                }
            }
            None => {}
        }
        if i == 2 {
            guard.take(); // inference finishes, gate frees up
        }
    }

    assert_eq!(processed, 3); // frames 1, 4, 5
    assert_eq!(gate.cycles_rejected(), 2); // frames 2, 3 dropped
}

#[test]
fn test_calibration_survives_config_round_trip() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("mimic.json");

    let mut sim = StreamSimulator::with_seed(21);
    for _ in 0..4 {
        sim.push_frame(64);
    }

    let mut pipeline = Pipeline::new(AppConfig {
        filter_enabled: false,
        ..AppConfig::default()
    });
    let mut predictor = BodyBytePredictor;

    pipeline.start_calibration(Timestamp::ZERO);
    let mut t = 0.0;
    for frame in pipeline.ingest_at(sim.bytes(), Timestamp::from_secs_f64(0.1)) {
        t += 0.1;
        let frame = Frame {
            timestamp: Timestamp::from_secs_f64(t),
            ..frame
        };
        pipeline.process(&frame, &mut predictor);
    }
    pipeline.stop_calibration();
    assert!(pipeline.calibration().is_calibrated());

    let store = ConfigStore::new(path.clone());
    store.replace(pipeline.export_config());
    store.save().unwrap();

    // A fresh process restores the calibrated tracker from disk
    let reloaded = ConfigStore::new(path).get();
    assert!(reloaded.calibrated);

    let restored = Pipeline::new(reloaded);
    assert!(restored.calibration().is_calibrated());
}
