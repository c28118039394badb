//! End-to-end tests for the acquisition and interchange pipeline:
//! raw bytes -> frame decoder -> synchronized records -> sequence file ->
//! read back.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

use tarang_io::sequence::{read_volume, SequenceHeader, SequenceRecorder, ELEMENT_DATA_MARKER};
use tarang_io::stream::{FrameDecoder, Separator, StreamGeometry};
use tarang_io::types::{ImageFrame, PoseUpdate, Transform3};

/// Wire bytes for one acquisition cycle (separator, index, payload,
/// trailing array header). A frame decodes only once the next cycle's
/// separator confirms its end.
fn cycle(index: u16, samples: &[u16]) -> Vec<u8> {
    let mut bytes = Separator::amode().as_bytes().to_vec();
    bytes.extend_from_slice(&index.to_le_bytes());
    for s in samples {
        bytes.extend_from_slice(&s.to_le_bytes());
    }
    bytes.extend_from_slice(&[0x01, 0x02, 0x03, 0x04]);
    bytes
}

#[test]
fn chunked_delivery_matches_single_ingest() {
    let geometry = StreamGeometry::new(4, 16);
    let mut rng = StdRng::seed_from_u64(42);

    let mut stream: Vec<u8> = (0..13).map(|_| rng.gen()).collect(); // leading garbage
    let mut payloads = Vec::new();
    for i in 0..10u16 {
        let samples: Vec<u16> = (0..geometry.sample_len()).map(|_| rng.gen()).collect();
        stream.extend_from_slice(&cycle(i, &samples));
        payloads.push(samples);
    }
    stream.extend_from_slice(Separator::amode().as_bytes());

    let mut whole = FrameDecoder::new(geometry);
    let reference = whole.ingest(&stream);
    assert_eq!(reference.len(), 10);
    for (frame, payload) in reference.iter().zip(&payloads) {
        assert_eq!(frame.samples(), payload.as_slice());
    }

    // Re-deliver the same stream in random chunks
    let mut chunked = FrameDecoder::new(geometry);
    let mut decoded = Vec::new();
    let mut offset = 0;
    while offset < stream.len() {
        let len = rng.gen_range(1..=97).min(stream.len() - offset);
        decoded.extend(chunked.ingest(&stream[offset..offset + len]));
        offset += len;
    }
    assert_eq!(decoded, reference);
    assert_eq!(chunked.stats().frames_decoded, 10);
    assert_eq!(chunked.stats().corrupt_frames, 0);
}

#[test]
fn incomplete_frame_waits_for_closing_separator() {
    // [garbage][SEP idx=1 payload1][SEP idx=2 payload2][SEP], split mid-payload
    let geometry = StreamGeometry::new(2, 4);
    let p1: Vec<u16> = (100..108).collect();
    let p2: Vec<u16> = (200..208).collect();

    let mut stream = vec![0xEE, 0xEE, 0xEE];
    stream.extend_from_slice(&cycle(1, &p1));
    let second_start = stream.len();
    stream.extend_from_slice(&cycle(2, &p2));
    stream.extend_from_slice(Separator::amode().as_bytes());

    let cut1 = second_start - 5; // mid-payload1
    let cut2 = stream.len() - 20; // mid-payload2

    let mut dec = FrameDecoder::new(geometry);
    assert!(dec.ingest(&stream[..cut1]).is_empty());

    let frames = dec.ingest(&stream[cut1..cut2]);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].index(), 1);
    assert_eq!(frames[0].samples(), p1.as_slice());

    let frames = dec.ingest(&stream[cut2..]);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].index(), 2);
    assert_eq!(frames[0].samples(), p2.as_slice());
}

#[test]
fn recorded_session_reads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.mha");
    let mut rng = StdRng::seed_from_u64(7);

    let (width, height, count) = (8, 6, 5);
    let mut recorder = SequenceRecorder::create(&path).unwrap();
    recorder.start_record();

    let mut expected_pixels = Vec::new();
    for _ in 0..count {
        let pixels: Vec<u8> = (0..width * height).map(|_| rng.gen()).collect();
        expected_pixels.extend_from_slice(&pixels);
        recorder.on_image(&ImageFrame::new(width, height, pixels).unwrap());
        recorder.on_poses(&PoseUpdate {
            probe: Transform3::identity(),
            reference: Transform3::identity(),
        });
    }
    let info = recorder.finish().unwrap();
    assert_eq!(info.record_count, count);
    assert_eq!(info.image_bytes as usize, expected_pixels.len());

    // The record file shares the volume grammar: header keys parse, frame
    // metadata lines are ignored as unknown keys, payload follows the marker.
    let volume = read_volume(&path).unwrap();
    assert_eq!(
        volume.header.dim_size,
        vec![width as i32, height as i32, count as i32]
    );
    assert!(!volume.header.compressed_data);
    assert_eq!(volume.voxels, expected_pixels);

    // Metadata blocks are complete and timestamps ordered
    let contents = std::fs::read(&path).unwrap();
    let marker = format!("{ELEMENT_DATA_MARKER}\n");
    let marker_pos = contents
        .windows(marker.len())
        .position(|w| w == marker.as_bytes())
        .unwrap();
    let text = std::str::from_utf8(&contents[..marker_pos]).unwrap();

    let timestamps: Vec<f64> = text
        .lines()
        .filter(|l| l.contains("_Timestamp = "))
        .map(|l| l.split(" = ").nth(1).unwrap().parse().unwrap())
        .collect();
    assert_eq!(timestamps.len(), count);
    assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));

    for i in 0..count {
        assert!(text.contains(&format!("Seq_Frame{i:04}_ProbeToTrackerTransformStatus = OK")));
        assert!(text.contains(&format!("Seq_Frame{i:04}_ImageStatus = OK")));
    }
}

#[test]
fn volume_roundtrip_through_header_codec() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("volume.mha");

    let mut header = SequenceHeader::image_defaults();
    header.dim_size = vec![4, 4, 2];
    header.element_spacing = vec![0.5, 0.5, 1.0];

    let blob: Vec<u8> = (0..32).collect();
    let mut bytes = header.serialize().into_bytes();
    bytes.extend_from_slice(format!("{ELEMENT_DATA_MARKER}\n").as_bytes());
    bytes.extend_from_slice(&blob);
    std::fs::write(&path, bytes).unwrap();

    let volume = read_volume(&path).unwrap();
    assert_eq!(volume.header, header);
    assert_eq!(volume.voxels, blob);
    assert_eq!(volume.declared_voxel_count(), 32);
}
