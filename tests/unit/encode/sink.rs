use super::*;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("parallax_sink_{tag}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn frame(w: u32, h: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied: true,
    }
}

#[test]
fn null_sink_counts_frames() {
    let mut sink = NullSink::default();
    let f = frame(2, 2, [0, 0, 0, 255]);
    sink.push_frame(FrameIndex(0), &f).unwrap();
    sink.push_frame(FrameIndex(1), &f).unwrap();
    sink.finish().unwrap();
    assert_eq!(sink.frames, 2);
}

#[test]
fn png_sequence_names_frames_by_index() {
    let dir = temp_dir("seq");
    let mut sink = PngSequenceSink::new(&dir).unwrap();
    let f = frame(4, 3, [255, 22, 57, 255]);
    sink.push_frame(FrameIndex(0), &f).unwrap();
    sink.push_frame(FrameIndex(7), &f).unwrap();
    sink.finish().unwrap();

    assert_eq!(sink.written().len(), 2);
    assert!(dir.join("frame_000000.png").is_file());
    assert!(dir.join("frame_000007.png").is_file());

    let img = image::open(dir.join("frame_000007.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 3));
    assert_eq!(img.get_pixel(1, 1).0, [255, 22, 57, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn write_png_unpremultiplies() {
    let dir = temp_dir("unpremul");
    let path = dir.join("half.png");
    write_png(&path, &frame(1, 1, [64, 0, 0, 128])).unwrap();
    let img = image::open(&path).unwrap().to_rgba8();
    let [r, g, b, a] = img.get_pixel(0, 0).0;
    assert_eq!((g, b, a), (0, 0, 128));
    assert!(r.abs_diff(128) <= 1);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn write_png_rejects_short_data() {
    let dir = temp_dir("short");
    let bad = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 8],
        premultiplied: false,
    };
    assert!(write_png(&dir.join("bad.png"), &bad).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}
