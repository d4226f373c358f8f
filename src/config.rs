//! Configuration for a PDF generation run.
//!
//! All pipeline behaviour is controlled through [`PipelineConfig`], built via
//! its [`PipelineConfigBuilder`] and constructed once per invocation. Stage
//! functions receive it by reference — there is no module-level mutable state,
//! so the same process could in principle build several configs for several
//! documents (though running them concurrently is unsupported: the backup and
//! stash paths would race).

use crate::error::Resume2PdfError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Default renderer command, from the `resumed` JSON Resume exporter.
pub const DEFAULT_RENDERER: &str = "resumed";
/// Default visual theme passed to the renderer.
pub const DEFAULT_THEME: &str = "jsonresume-theme-macchiato-custom";
/// Stash file name, created next to the resume document.
pub const STASH_FILE_NAME: &str = ".pdfurl.tmp";

/// Configuration for one run of the generation pipeline.
///
/// Built via [`PipelineConfig::builder()`] or [`PipelineConfig::default()`].
///
/// # Example
/// ```rust
/// use resume2pdf::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .resume_path("site/resume.json")
///     .theme("jsonresume-theme-even")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct PipelineConfig {
    /// Path to the resume document (JSON Resume format). Default: `resume.json`.
    pub resume_path: PathBuf,

    /// Path of the temporary backup copy. Default: `<resume_path>.backup`.
    ///
    /// The backup is the integrity anchor of the whole pipeline: every error
    /// and interrupt path restores the document from it byte-for-byte. It
    /// exists only for the duration of one run.
    pub backup_path: PathBuf,

    /// Path of the stash file holding the extracted `basics.pdfUrl` value.
    /// Default: `.pdfurl.tmp` next to the resume document.
    pub stash_path: PathBuf,

    /// Directory the renderer runs in. Default: the resume document's parent
    /// directory, so the renderer resolves `resume.json` and its theme the
    /// same way a manual `resumed export` invocation would.
    pub workdir: PathBuf,

    /// Output PDF file name passed to the renderer. Default: `resume.pdf`.
    ///
    /// Relative names are resolved by the renderer against [`Self::workdir`].
    pub output: PathBuf,

    /// Theme name passed to the renderer via `--theme`. Default:
    /// [`DEFAULT_THEME`].
    pub theme: String,

    /// Renderer executable. Default: [`DEFAULT_RENDERER`].
    ///
    /// Overridable mainly for tests, which point this at a stub command
    /// instead of a real `resumed` install.
    pub renderer_command: String,

    /// Browser launch arguments forwarded to the renderer's headless Chrome
    /// (the host's `PUPPETEER_ARGS`). When set, the renderer environment gains
    /// `PUPPETEER_ARGS`, `PUPPETEER_LAUNCH_ARGS`, and `CHROME_ARGS` — the
    /// three spellings different theme toolchains read.
    pub puppeteer_args: Option<String>,

    /// Explicit Chrome/Chromium executable for the renderer
    /// (`PUPPETEER_EXECUTABLE_PATH`).
    pub executable_path: Option<PathBuf>,

    /// Value for `PUPPETEER_SKIP_CHROMIUM_DOWNLOAD`, forwarded only when
    /// [`Self::puppeteer_args`] is set. `None` means `"false"` — CI images
    /// that ship their own Chrome set this to `"true"` alongside an
    /// executable path.
    pub skip_chromium_download: Option<String>,

    /// X display used when the host environment has no `DISPLAY` of its own.
    /// Default: `:99`, the conventional Xvfb display in CI.
    pub display: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let resume_path = PathBuf::from("resume.json");
        Self {
            backup_path: default_backup_path(&resume_path),
            stash_path: default_stash_path(&resume_path),
            workdir: default_workdir(&resume_path),
            resume_path,
            output: PathBuf::from("resume.pdf"),
            theme: DEFAULT_THEME.to_string(),
            renderer_command: DEFAULT_RENDERER.to_string(),
            puppeteer_args: None,
            executable_path: None,
            skip_chromium_download: None,
            display: ":99".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create a new builder for `PipelineConfig`.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder {
            config: Self::default(),
            backup_override: None,
            stash_override: None,
            workdir_override: None,
        }
    }

    /// Arguments passed to the renderer command:
    /// `export -o <output> --theme <theme>`.
    pub fn renderer_args(&self) -> Vec<String> {
        vec![
            "export".to_string(),
            "-o".to_string(),
            self.output.display().to_string(),
            "--theme".to_string(),
            self.theme.clone(),
        ]
    }
}

/// `<resume>.backup`, in the same directory as the document.
fn default_backup_path(resume: &Path) -> PathBuf {
    let mut os = resume.as_os_str().to_os_string();
    os.push(".backup");
    PathBuf::from(os)
}

/// `.pdfurl.tmp`, in the same directory as the document.
fn default_stash_path(resume: &Path) -> PathBuf {
    default_workdir(resume).join(STASH_FILE_NAME)
}

fn default_workdir(resume: &Path) -> PathBuf {
    match resume.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Builder for [`PipelineConfig`].
///
/// Backup, stash, and working-directory paths follow the resume path unless
/// overridden explicitly, so `builder().resume_path("a/b.json")` does the
/// right thing without three more calls.
#[derive(Debug)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
    backup_override: Option<PathBuf>,
    stash_override: Option<PathBuf>,
    workdir_override: Option<PathBuf>,
}

impl PipelineConfigBuilder {
    pub fn resume_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.resume_path = path.into();
        self
    }

    pub fn backup_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.backup_override = Some(path.into());
        self
    }

    pub fn stash_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stash_override = Some(path.into());
        self
    }

    pub fn workdir(mut self, path: impl Into<PathBuf>) -> Self {
        self.workdir_override = Some(path.into());
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = path.into();
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.config.theme = theme.into();
        self
    }

    pub fn renderer_command(mut self, command: impl Into<String>) -> Self {
        self.config.renderer_command = command.into();
        self
    }

    pub fn puppeteer_args(mut self, args: impl Into<String>) -> Self {
        self.config.puppeteer_args = Some(args.into());
        self
    }

    pub fn executable_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.executable_path = Some(path.into());
        self
    }

    pub fn skip_chromium_download(mut self, value: impl Into<String>) -> Self {
        self.config.skip_chromium_download = Some(value.into());
        self
    }

    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.config.display = display.into();
        self
    }

    /// Build the configuration, deriving dependent paths and validating.
    pub fn build(self) -> Result<PipelineConfig, Resume2PdfError> {
        let mut config = self.config;

        config.backup_path = self
            .backup_override
            .unwrap_or_else(|| default_backup_path(&config.resume_path));
        config.stash_path = self
            .stash_override
            .unwrap_or_else(|| default_stash_path(&config.resume_path));
        config.workdir = self
            .workdir_override
            .unwrap_or_else(|| default_workdir(&config.resume_path));

        if config.resume_path.as_os_str().is_empty() {
            return Err(Resume2PdfError::InvalidConfig(
                "resume path must not be empty".into(),
            ));
        }
        if config.renderer_command.trim().is_empty() {
            return Err(Resume2PdfError::InvalidConfig(
                "renderer command must not be empty".into(),
            ));
        }
        if config.theme.trim().is_empty() {
            return Err(Resume2PdfError::InvalidConfig(
                "theme must not be empty".into(),
            ));
        }
        if config.backup_path == config.resume_path || config.stash_path == config.resume_path {
            return Err(Resume2PdfError::InvalidConfig(
                "backup/stash paths must differ from the resume path".into(),
            ));
        }

        Ok(config)
    }
}
