use super::*;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::whole(30).unwrap(),
    }
}

#[test]
fn odd_dimensions_are_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let err = sink.begin(cfg(801, 450)).unwrap_err();
    assert!(err.to_string().contains("even"));
}

#[test]
fn push_before_begin_is_an_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = FrameRGB::new(2, 2, vec![0; 12]).unwrap();
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn ensure_parent_dir_creates_nested_directories() {
    let root = std::env::temp_dir().join(format!("decodefx_parent_{}", std::process::id()));
    let out = root.join("a/b/out.mp4");
    ensure_parent_dir(&out).unwrap();
    assert!(root.join("a/b").is_dir());
    ensure_parent_dir(Path::new("bare.mp4")).unwrap();
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn writes_an_mp4_when_ffmpeg_is_available() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let out = std::env::temp_dir().join(format!("decodefx_ffmpeg_{}.mp4", std::process::id()));
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(cfg(16, 16)).unwrap();
    for i in 0..5u8 {
        let frame = FrameRGB::new(16, 16, vec![i * 40; 16 * 16 * 3]).unwrap();
        sink.push_frame(FrameIndex(u64::from(i)), &frame).unwrap();
    }
    assert!(
        sink.push_frame(FrameIndex(2), &FrameRGB::new(16, 16, vec![0; 768]).unwrap())
            .is_err()
    );
    sink.end().unwrap();
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
    std::fs::remove_file(&out).ok();
}
