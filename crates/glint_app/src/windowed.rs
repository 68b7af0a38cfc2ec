//! Desktop entry points using the winit backend

use crate::app::App;
use crate::config::ShellConfig;
use crate::dispatch::Shell;
use crate::error::Result;
use glint_platform_desktop::DesktopNative;

/// Run `f` in a desktop window with the default configuration
///
/// Call from the main thread; some platforms only allow windowing there.
pub fn run_windowed<F, R>(f: F) -> Result<R>
where
    F: FnOnce(App) -> R + Send + 'static,
    R: Send + 'static,
{
    run_windowed_with_config(ShellConfig::default(), f)
}

/// Run `f` in a desktop window configured by `config`
pub fn run_windowed_with_config<F, R>(config: ShellConfig, f: F) -> Result<R>
where
    F: FnOnce(App) -> R + Send + 'static,
    R: Send + 'static,
{
    let native = DesktopNative::new()?;
    Shell::new(native).with_config(config).run(f)
}
