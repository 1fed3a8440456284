use nanorand::{Rng, WyRand};
use sha1::Digest as _;
use sha1_batch::*;

const TEST_INPUT: &str = "All work and no play makes Jack a dull boy";
const TEST_OUTPUT: [u8; 20] = [
    166, 44, 167, 32, 251, 171, 131, 12, 136, 144, 4, 78, 172, 190, 172, 33, 111, 28, 162, 228,
];

#[test]
fn sha1() {
    let hasher = Hasher::new().unwrap();
    let mut digest = hasher.digest(Sha1, TEST_INPUT.len(), 16).unwrap();
    let mut input_buffer = digest.input_buffer();

    while let Some(frame) = input_buffer.next_frame() {
        frame.copy_from_slice(TEST_INPUT.as_bytes());
    }

    digest.run().unwrap();

    let mut output_buffer = digest.output_buffer();

    assert_eq!(output_buffer.num_frames(), 16);

    while let Some(output) = output_buffer.next_frame() {
        assert_eq!(output, TEST_OUTPUT);
    }
}

#[test]
fn random_frames_match_reference() {
    let mut rng = WyRand::new_seed(0x5a1);
    let hasher = Hasher::with_config(HasherConfig::new().thread_execution_width(7).num_threads(3))
        .unwrap();

    // frame lengths straddling the padding boundary and multi-block frames
    for inlen in [1, 55, 56, 63, 64, 65, 200] {
        let mut digest = hasher.digest(Sha1, inlen, 50).unwrap();
        let mut input_buffer = digest.input_buffer();
        while let Some(frame) = input_buffer.next_frame() {
            rng.fill_bytes(frame);
        }

        digest.run().unwrap();

        let outputs: Vec<&[u8]> = digest.output_buffer().collect();
        assert_eq!(outputs.len(), 50);
        for (frame, output) in digest.input_frames().zip(outputs) {
            assert_eq!(output, &sha1::Sha1::digest(frame)[..], "inlen {inlen}");
        }
    }
}

#[test]
fn partial_batch_with_idle_lanes() {
    let hasher = Hasher::with_config(HasherConfig::new().thread_execution_width(4)).unwrap();
    let mut digest = hasher.digest(Sha1, 3, 16).unwrap();

    // 9 frames: two full groups of 4 plus one lane in a third
    let mut input_buffer = digest.input_buffer();
    for i in 0..9u8 {
        input_buffer
            .next_frame()
            .unwrap()
            .copy_from_slice(&[i, i, i]);
    }

    digest.run().unwrap();

    let output_buffer = digest.output_buffer();
    assert_eq!(output_buffer.num_frames(), 9);
    for (i, output) in output_buffer.enumerate() {
        let i = i as u8;
        assert_eq!(output, gpu_sha1::sha1(&[i, i, i]));
    }
}

#[test]
fn rerun_with_new_input() {
    let hasher = Hasher::new().unwrap();
    let mut digest = hasher.digest(Sha1, 3, 4).unwrap();

    let mut input_buffer = digest.input_buffer();
    while let Some(frame) = input_buffer.next_frame() {
        frame.copy_from_slice(b"abc");
    }
    digest.run().unwrap();
    assert_eq!(digest.output_buffer().num_frames(), 4);

    digest
        .input_buffer()
        .next_frame()
        .unwrap()
        .copy_from_slice(b"xyz");
    digest.run().unwrap();

    let expected = gpu_sha1::sha1(b"xyz");
    let outputs: Vec<&[u8]> = digest.output_buffer().collect();
    assert_eq!(outputs, vec![&expected[..]]);
}
