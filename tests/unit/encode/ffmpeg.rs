use super::*;

#[test]
fn config_validation_catches_bad_values() {
    assert!(EncodeConfig::mp4("out.mp4", 0, 10, 30).validate().is_err());
    assert!(EncodeConfig::mp4("out.mp4", 11, 10, 30).validate().is_err());
    assert!(EncodeConfig::mp4("out.mp4", 10, 10, 0).validate().is_err());
    assert!(EncodeConfig::mp4("out.mp4", 494, 494, 60).validate().is_ok());
}

#[test]
fn flatten_premul_over_black() {
    let src = [128u8, 0, 0, 128];
    let mut dst = [0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, [128, 0, 0, 255]);
}

#[test]
fn flatten_straight_over_black() {
    let src = [255u8, 0, 0, 128];
    let mut dst = [0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, false, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, [128, 0, 0, 255]);
}

#[test]
fn flatten_transparent_shows_background() {
    let src = [0u8, 0, 0, 0];
    let mut dst = [0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [0xff, 0x16, 0x39, 0xff]).unwrap();
    assert_eq!(dst, [0xff, 0x16, 0x39, 0xff]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = [0u8; 8];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0u8; 4], true, [0, 0, 0, 255]).is_err());
}

#[test]
fn unfinished_sink_reaps_its_child() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let dir = std::env::temp_dir().join(format!("parallax_ffmpeg_{}", std::process::id()));
    let cfg = EncodeConfig::mp4(dir.join("partial.mp4"), 4, 4, 30);
    let mut sink = FfmpegSink::new(cfg, [0, 0, 0, 255]).unwrap();
    let frame = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![255; 4 * 4 * 4],
        premultiplied: true,
    };
    sink.push_frame(FrameIndex(0), &frame).unwrap();

    sink.reap();
    assert!(sink.child.is_none());
    assert!(sink.stdin.is_none());
    assert!(sink.push_frame(FrameIndex(1), &frame).is_err());
    assert!(sink.finish().is_ok());
    drop(sink);

    let _ = std::fs::remove_dir_all(&dir);
}
