//! End-to-end runs over a temporary source directory.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use corpus_compose::audio::{AudioError, AudioResampler};
use corpus_compose::config::{AppConfig, ResamplerBackend};
use corpus_compose::correction::content_hash;
use corpus_compose::pipeline::{run, CorpusJob, PipelineError};
use tempfile::{tempdir, TempDir};

const TALK_A: &str = "talkAAAAAAA";
const TALK_B: &str = "talkBBBBBBB";

const TALK_A_VTT: &str = "WEBVTT\n\
Kind: captions\n\
Language: ja\n\
\n\
00:00:01.000 --> 00:00:02.500\n\
今日わ\n\
\n\
00:00:03.000 --> 00:00:04.000\n\
こんにちは、\n\
世界（笑）\n\
\n\
00:00:05.000 --> 00:00:06.000\n\
♪\n";

const TALK_B_VTT: &str = "WEBVTT\n\n00:00:00.500 --> 00:00:01.000\nABC 123\n";

/// Records every call and writes a placeholder file at the output path.
#[derive(Default)]
struct RecordingResampler {
    calls: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl RecordingResampler {
    fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.lock().expect("lock").clone()
    }
}

impl AudioResampler for RecordingResampler {
    fn resample(&self, input: &Path, output: &Path) -> Result<(), AudioError> {
        if !input.exists() {
            return Err(AudioError::MissingInput(input.to_path_buf()));
        }
        std::fs::write(output, b"RIFF").expect("write fake wav");
        self.calls
            .lock()
            .expect("lock")
            .push((input.to_path_buf(), output.to_path_buf()));
        Ok(())
    }
}

/// Writes its output like a real tool, then fails on the `fail_on`-th call.
struct FailingResampler {
    fail_on: usize,
    calls: Mutex<usize>,
}

impl FailingResampler {
    fn new(fail_on: usize) -> Self {
        Self {
            fail_on,
            calls: Mutex::new(0),
        }
    }
}

impl AudioResampler for FailingResampler {
    fn resample(&self, input: &Path, output: &Path) -> Result<(), AudioError> {
        let mut calls = self.calls.lock().expect("lock");
        *calls += 1;
        std::fs::write(output, b"RIFF").expect("write fake wav");
        if *calls == self.fail_on {
            return Err(AudioError::ToolFailed {
                program: "sox".into(),
                input: input.to_path_buf(),
                code: Some(2),
                stderr: "sox FAIL formats: can't open input file".into(),
            });
        }
        Ok(())
    }
}

struct Fixture {
    _root: TempDir,
    job: CorpusJob,
}

impl Fixture {
    fn new() -> Self {
        let root = tempdir().expect("temp dir");
        let src_dir = root.path().join("downloads");
        let diff_data_dir = root.path().join("data");
        std::fs::create_dir_all(&src_dir).expect("src dir");
        std::fs::create_dir_all(diff_data_dir.join("diffs")).expect("diffs dir");

        let job = CorpusJob {
            src_dir,
            dst_dir: root.path().join("corpus"),
            diff_data_dir,
            config: AppConfig::default(),
        };
        Self { _root: root, job }
    }

    fn source(&self, id: &str, vtt: &str, with_audio: bool) -> &Self {
        std::fs::write(self.job.src_dir.join(format!("{id}.ja.vtt")), vtt).expect("vtt");
        if with_audio {
            std::fs::write(self.job.src_dir.join(format!("{id}.wav")), b"").expect("wav");
        }
        self
    }

    fn table(&self, rows: &[(&str, &str, &str)]) -> &Self {
        let body: String = rows
            .iter()
            .map(|(source_id, text, utt_id)| {
                format!("{} {utt_id}\n", content_hash(source_id, text))
            })
            .collect();
        std::fs::write(self.job.table_path(), body).expect("table");
        self
    }

    fn diff(&self, utt_id: &str, tokens: &str) -> &Self {
        std::fs::write(self.job.diffs_dir().join(format!("{utt_id}.diff")), tokens)
            .expect("diff");
        self
    }

    fn output(&self, name: &str) -> String {
        std::fs::read_to_string(self.job.dst_dir.join(name))
            .unwrap_or_else(|e| panic!("reading {name}: {e}"))
    }
}

fn standard_fixture() -> Fixture {
    let fx = Fixture::new();
    fx.source(TALK_A, TALK_A_VTT, true)
        .source(TALK_B, TALK_B_VTT, true)
        .table(&[
            (TALK_B, "ＡＢＣ１２３", "talkBBBBBBB_00000050--00000100"),
            (TALK_A, "今日わ", "talkAAAAAAA_00000100--00000250"),
            (TALK_A, "こんにちは世界", "talkAAAAAAA_00000300--00000400"),
        ])
        .diff(
            "talkAAAAAAA_00000100--00000250",
            r#"["", "", "- わ", "+ は"]"#,
        );
    fx
}

#[test]
fn composes_every_corpus_file() {
    let fx = standard_fixture();
    let resampler = RecordingResampler::default();

    let summary = run(&fx.job, &resampler).unwrap();

    assert_eq!(
        fx.output("segments"),
        "talkBBBBBBB_00000050--00000100 talkBBBBBBB 0.50 1.00\n\
         talkAAAAAAA_00000100--00000250 talkAAAAAAA 1.00 2.50\n\
         talkAAAAAAA_00000300--00000400 talkAAAAAAA 3.00 4.00\n"
    );
    assert_eq!(
        fx.output("text"),
        "talkBBBBBBB_00000050--00000100 ＡＢＣ１２３\n\
         talkAAAAAAA_00000100--00000250 今日は\n\
         talkAAAAAAA_00000300--00000400 こんにちは世界\n"
    );
    assert_eq!(
        fx.output("utt2spk"),
        "talkBBBBBBB_00000050--00000100 talkBBBBBBB\n\
         talkAAAAAAA_00000100--00000250 talkAAAAAAA\n\
         talkAAAAAAA_00000300--00000400 talkAAAAAAA\n"
    );
    assert_eq!(
        fx.output("spk2utt"),
        "talkBBBBBBB talkBBBBBBB_00000050--00000100\n\
         talkAAAAAAA talkAAAAAAA_00000100--00000250 talkAAAAAAA_00000300--00000400\n"
    );
    assert_eq!(
        fx.output("wavlist.txt"),
        "talkBBBBBBB talkBBBBBBB.16k.wav\n\
         talkAAAAAAA talkAAAAAAA.16k.wav\n"
    );

    assert_eq!(summary.sources_found, 2);
    assert_eq!(summary.sources_skipped, 0);
    assert_eq!(summary.utterances_indexed, 3);
    assert_eq!(summary.entries_joined, 3);
    assert_eq!(summary.patches_applied, 1);
    assert_eq!(summary.records_unmatched, 0);
    assert_eq!(summary.sources_resampled, 2);
}

#[test]
fn resamples_each_source_once_into_wav_dir() {
    let fx = standard_fixture();
    let resampler = RecordingResampler::default();

    run(&fx.job, &resampler).unwrap();

    let calls = resampler.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, fx.job.src_dir.join("talkBBBBBBB.wav"));
    assert_eq!(
        calls[0].1,
        fx.job.dst_dir.join("wav").join("talkBBBBBBB.16k.wav")
    );
    assert!(fx.job.dst_dir.join("wav/talkAAAAAAA.16k.wav").exists());
}

#[test]
fn missing_audio_skips_the_source() {
    let fx = standard_fixture();
    fx.source("lonelyCCCCC", TALK_B_VTT, false);
    let resampler = RecordingResampler::default();

    let summary = run(&fx.job, &resampler).unwrap();

    assert_eq!(summary.sources_found, 3);
    assert_eq!(summary.sources_skipped, 1);
    assert!(!fx.output("utt2spk").contains("lonelyCCCCC"));
    assert_eq!(resampler.calls().len(), 2);
}

#[test]
fn unmatched_records_are_ignored() {
    let fx = Fixture::new();
    fx.source(TALK_B, TALK_B_VTT, true).table(&[
        (TALK_B, "別の字幕", "talkBBBBBBB_00000200--00000300"),
        (TALK_B, "ＡＢＣ１２３", "talkBBBBBBB_00000050--00000100"),
    ]);
    let resampler = RecordingResampler::default();

    let summary = run(&fx.job, &resampler).unwrap();

    assert_eq!(summary.records_unmatched, 1);
    assert_eq!(summary.entries_joined, 1);
    assert_eq!(
        fx.output("text"),
        "talkBBBBBBB_00000050--00000100 ＡＢＣ１２３\n"
    );
}

#[test]
fn source_without_entries_is_not_resampled() {
    let fx = Fixture::new();
    fx.source(TALK_A, TALK_A_VTT, true)
        .source(TALK_B, TALK_B_VTT, true)
        .table(&[(TALK_B, "ＡＢＣ１２３", "talkBBBBBBB_00000050--00000100")]);
    let resampler = RecordingResampler::default();

    run(&fx.job, &resampler).unwrap();

    assert_eq!(resampler.calls().len(), 1);
    assert_eq!(fx.output("wavlist.txt"), "talkBBBBBBB talkBBBBBBB.16k.wav\n");
    assert_eq!(
        fx.output("spk2utt"),
        "talkBBBBBBB talkBBBBBBB_00000050--00000100\n"
    );
}

#[test]
fn inconsistent_patch_writes_nothing() {
    let fx = standard_fixture();
    fx.diff(
        "talkBBBBBBB_00000050--00000100",
        r#"["", "", "", "", "", "", ""]"#,
    );
    let resampler = RecordingResampler::default();

    let err = run(&fx.job, &resampler).unwrap_err();

    assert!(matches!(err, PipelineError::Patch { .. }), "got {err}");
    assert!(!fx.job.dst_dir.exists());
    assert!(resampler.calls().is_empty());
}

#[test]
fn failed_resample_leaves_no_destination() {
    let fx = standard_fixture();

    let err = run(&fx.job, &FailingResampler::new(2)).unwrap_err();

    assert!(
        matches!(&err, PipelineError::Audio { source_id, .. } if source_id == TALK_A),
        "got {err}"
    );
    assert!(!fx.job.dst_dir.exists());
}

#[test]
fn failed_resample_keeps_existing_destination_files() {
    let fx = standard_fixture();
    std::fs::create_dir_all(&fx.job.dst_dir).expect("dst dir");
    std::fs::write(fx.job.dst_dir.join("README"), "previous run").expect("write");

    run(&fx.job, &FailingResampler::new(1)).unwrap_err();

    let mut names: Vec<String> = std::fs::read_dir(&fx.job.dst_dir)
        .expect("read dst")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["README"]);
}

#[test]
fn invalid_patch_token_is_fatal() {
    let fx = standard_fixture();
    fx.diff("talkBBBBBBB_00000050--00000100", r#"["?x"]"#);

    let err = run(&fx.job, &RecordingResampler::default()).unwrap_err();
    assert!(matches!(err, PipelineError::Patch { .. }), "got {err}");
}

#[test]
fn malformed_subtitle_is_fatal() {
    let fx = Fixture::new();
    fx.source(TALK_A, "WEBVTT\n\n00:00:xx --> 00:00:02.000\nはい\n", true)
        .table(&[]);

    let err = run(&fx.job, &RecordingResampler::default()).unwrap_err();
    assert!(matches!(err, PipelineError::Subtitle(_)), "got {err}");
    assert!(!fx.job.dst_dir.exists());
}

#[test]
fn missing_table_is_fatal() {
    let fx = Fixture::new();
    fx.source(TALK_B, TALK_B_VTT, true);

    let err = run(&fx.job, &RecordingResampler::default()).unwrap_err();
    assert!(matches!(err, PipelineError::Table(_)), "got {err}");
}

#[test]
fn native_backend_writes_16k_mono() {
    let fx = Fixture::new();
    fx.source(TALK_B, TALK_B_VTT, true)
        .table(&[(TALK_B, "ＡＢＣ１２３", "talkBBBBBBB_00000050--00000100")]);

    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 48_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer =
        hound::WavWriter::create(fx.job.src_dir.join("talkBBBBBBB.wav"), spec).expect("wav");
    for _ in 0..48_000 * 2 {
        writer.write_sample(1_000_i16).expect("sample");
    }
    writer.finalize().expect("finalize");

    let mut job = fx.job.clone();
    job.config.audio.backend = ResamplerBackend::Native;
    let resampler = corpus_compose::audio::resampler_from_config(&job.config.audio);

    let summary = run(&job, resampler.as_ref()).unwrap();
    assert_eq!(summary.sources_resampled, 1);

    let reader =
        hound::WavReader::open(job.dst_dir.join("wav/talkBBBBBBB.16k.wav")).expect("output");
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.spec().sample_rate, 16_000);
    assert!(reader.duration().abs_diff(16_000) <= 1);
}
