//! Renderer invocation: one blocking subprocess per run.
//!
//! The pipeline never renders anything itself — `resumed` (or whatever
//! [`crate::config::PipelineConfig::renderer_command`] names) owns the
//! theme, the headless browser, and the PDF output. This module's job is
//! the environment contract: the renderer's Puppeteer stack reads browser
//! launch flags from several differently-spelled variables, and headless
//! CI boxes need a `DISPLAY` pointing at Xvfb.
//!
//! Stdio is inherited so the renderer's own progress and error output lands
//! on the operator's terminal unchanged.

use crate::config::PipelineConfig;
use crate::error::Resume2PdfError;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Run the external renderer and wait for it to exit.
///
/// Blocking: the pipeline suspends until the subprocess finishes. A non-zero
/// exit status is a fatal [`Resume2PdfError::RendererFailed`].
pub fn render(config: &PipelineConfig) -> Result<(), Resume2PdfError> {
    let args = config.renderer_args();
    info!(
        "Generating {} with `{} {}`",
        config.output.display(),
        config.renderer_command,
        args.join(" ")
    );

    let mut cmd = Command::new(&config.renderer_command);
    cmd.args(&args)
        .current_dir(&config.workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    apply_renderer_env(&mut cmd, config);

    let status = cmd
        .status()
        .map_err(|e| Resume2PdfError::RendererSpawnFailed {
            command: config.renderer_command.clone(),
            source: e,
        })?;

    if !status.success() {
        return Err(Resume2PdfError::RendererFailed {
            command: config.renderer_command.clone(),
            status,
        });
    }

    info!("PDF generation completed successfully");
    Ok(())
}

/// Extend the inherited environment with the renderer-specific overrides.
fn apply_renderer_env(cmd: &mut Command, config: &PipelineConfig) {
    if let Some(ref args) = config.puppeteer_args {
        debug!("Forwarding browser launch args: {args}");
        // Three spellings: puppeteer itself, resumed's launcher, and raw
        // Chrome wrappers each read a different one.
        cmd.env("PUPPETEER_ARGS", args)
            .env("PUPPETEER_LAUNCH_ARGS", args)
            .env("CHROME_ARGS", args);

        let skip = config.skip_chromium_download.as_deref().unwrap_or("false");
        cmd.env("PUPPETEER_SKIP_CHROMIUM_DOWNLOAD", skip);

        if let Some(ref exe) = config.executable_path {
            info!("Using browser executable: {}", exe.display());
            cmd.env("PUPPETEER_EXECUTABLE_PATH", exe);
        }
    }

    if std::env::var_os("DISPLAY").is_none() {
        cmd.env("DISPLAY", &config.display);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn config_with_command(command: &str) -> PipelineConfig {
        PipelineConfig::builder()
            .renderer_command(command)
            .workdir(std::env::temp_dir())
            .build()
            .unwrap()
    }

    fn env_of<'a>(cmd: &'a Command, key: &str) -> Option<&'a OsStr> {
        cmd.get_envs()
            .find(|(k, _)| *k == OsStr::new(key))
            .and_then(|(_, v)| v)
    }

    #[test]
    fn successful_renderer_exit_is_ok() {
        // `true` ignores the export args and exits 0
        render(&config_with_command("true")).unwrap();
    }

    #[test]
    fn nonzero_renderer_exit_is_fatal() {
        let err = render(&config_with_command("false")).unwrap_err();
        assert!(matches!(err, Resume2PdfError::RendererFailed { .. }));
    }

    #[test]
    fn missing_renderer_binary_is_spawn_failure() {
        let err = render(&config_with_command("resume2pdf-no-such-renderer")).unwrap_err();
        assert!(matches!(err, Resume2PdfError::RendererSpawnFailed { .. }));
    }

    #[test]
    fn puppeteer_args_fan_out_to_all_spellings() {
        let config = PipelineConfig::builder()
            .puppeteer_args("--no-sandbox --disable-gpu")
            .executable_path("/usr/bin/chromium")
            .skip_chromium_download("true")
            .build()
            .unwrap();

        let mut cmd = Command::new("true");
        apply_renderer_env(&mut cmd, &config);

        for key in ["PUPPETEER_ARGS", "PUPPETEER_LAUNCH_ARGS", "CHROME_ARGS"] {
            assert_eq!(
                env_of(&cmd, key),
                Some(OsStr::new("--no-sandbox --disable-gpu")),
                "{key} not forwarded"
            );
        }
        assert_eq!(
            env_of(&cmd, "PUPPETEER_SKIP_CHROMIUM_DOWNLOAD"),
            Some(OsStr::new("true"))
        );
        assert_eq!(
            env_of(&cmd, "PUPPETEER_EXECUTABLE_PATH"),
            Some(OsStr::new("/usr/bin/chromium"))
        );
    }

    #[test]
    fn no_puppeteer_env_without_args() {
        let config = PipelineConfig::default();
        let mut cmd = Command::new("true");
        apply_renderer_env(&mut cmd, &config);

        assert_eq!(env_of(&cmd, "PUPPETEER_ARGS"), None);
        assert_eq!(env_of(&cmd, "PUPPETEER_SKIP_CHROMIUM_DOWNLOAD"), None);
    }
}
