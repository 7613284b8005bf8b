//! Command plans for the container lifecycle.
//!
//! A plan lists the `docker` invocations a lifecycle step needs, in order,
//! without running any of them.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;

use crate::config::normalizer::{RuntimeConfig, PHPMYADMIN_PORT, WP_ROOT};
use crate::config::schema::ProjectType;
use crate::docker::command::DockerCommand;
use crate::error::{Error, Result};

/// Where the Composer package ships its Dockerfiles and scripts, relative to
/// the project root.
pub const VENDOR_DIR: &str = "vendor/aivec/codecept-docker";

/// Metadata directory inside the WordPress container.
pub const META_DIR: &str = "/wpcodecept-meta";

/// Selenoid image.
pub const SELENOID_IMAGE: &str = "aerokube/selenoid:1.10.3";

/// Video recorder image built for Selenoid.
pub const VIDEO_RECORDER_IMAGE: &str = "aivec/selenoid-video-recorder";

/// phpMyAdmin image.
pub const PHPMYADMIN_IMAGE: &str = "phpmyadmin/phpmyadmin";

/// Keys of `envvars` that are coerced to the strings `true`/`false`.
const BOOLEAN_WP_CONSTANTS: &[&str] = &["WP_DEBUG", "WP_DEBUG_DISPLAY", "WP_DEBUG_LOG", "MULTISITE"];

/// Lifecycle step a plan is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    /// Build images, create the network and run every container.
    Up,
    /// Start stopped containers.
    Start,
    /// Stop running containers.
    Stop,
    /// Stop and remove containers, then remove the network.
    Down,
    /// Create the project network only.
    Network,
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Down => "down",
            Self::Network => "network",
        };
        f.write_str(name)
    }
}

/// Host-side paths a plan mounts into containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Absolute project root.
    pub working_dir: PathBuf,
    /// Final segment of `working_dir`.
    pub dirname: String,
    /// Whether `tests/browsers.json` exists.
    pub has_browsers_json: bool,
}

impl ProjectLayout {
    /// Describes the project rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if `dir` cannot be canonicalized, or
    /// [`Error::UnnamedProjectDir`] for a filesystem root.
    pub fn discover(dir: &Path) -> Result<Self> {
        let working_dir = dir.canonicalize()?;
        let Some(dirname) = working_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
        else {
            return Err(Error::UnnamedProjectDir { path: working_dir });
        };
        let has_browsers_json = working_dir.join("tests").join("browsers.json").is_file();

        Ok(Self {
            working_dir,
            dirname,
            has_browsers_json,
        })
    }

    fn path(&self, relative: &str) -> String {
        self.working_dir.join(relative).display().to_string()
    }

    fn resolve(&self, path: &Path) -> String {
        if path.is_absolute() {
            path.display().to_string()
        } else {
            self.working_dir.join(path).display().to_string()
        }
    }
}

/// An ordered list of commands with a description and any warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandPlan {
    /// What the plan does.
    pub description: String,
    /// Commands in execution order.
    pub commands: Vec<DockerCommand>,
    /// Notes for the user.
    pub warnings: Vec<String>,
}

impl CommandPlan {
    /// Creates an empty plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use wpcodecept::docker::CommandPlan;
    ///
    /// let plan = CommandPlan::new("Stop containers");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            commands: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Appends a command.
    #[must_use]
    pub fn add_command(mut self, command: DockerCommand) -> Self {
        self.commands.push(command);
        self
    }

    /// Appends a warning.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Returns true if the plan has no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Builds the plan for a lifecycle step.
    #[must_use]
    pub fn build(kind: PlanKind, config: &RuntimeConfig, layout: &ProjectLayout) -> Self {
        match kind {
            PlanKind::Up => up(config, layout),
            PlanKind::Start => start(config),
            PlanKind::Stop => stop(config),
            PlanKind::Down => down(config),
            PlanKind::Network => Self::new(format!("Create network {}", config.network))
                .add_command(network_create(config)),
        }
    }
}

/// Containers of a project, in start order.
fn containers(config: &RuntimeConfig) -> Vec<&str> {
    let mut names = vec![
        config.mysql_container,
        config.phpmyadmin_container,
        config.container.as_str(),
    ];
    if config.use_selenoid {
        names.push(config.selenoid_container);
    }
    names
}

fn start(config: &RuntimeConfig) -> CommandPlan {
    containers(config).into_iter().fold(
        CommandPlan::new(format!("Start containers for {}", config.namespace)),
        |plan, name| plan.add_command(DockerCommand::docker().arg("start").arg(name)),
    )
}

fn stop(config: &RuntimeConfig) -> CommandPlan {
    containers(config).into_iter().rev().fold(
        CommandPlan::new(format!("Stop containers for {}", config.namespace)),
        |plan, name| plan.add_command(DockerCommand::docker().arg("stop").arg(name)),
    )
}

fn down(config: &RuntimeConfig) -> CommandPlan {
    let names = containers(config);
    let mut plan = stop(config);
    plan.description = format!("Remove containers and network for {}", config.namespace);

    names
        .into_iter()
        .rev()
        .fold(plan, |plan, name| {
            plan.add_command(DockerCommand::docker().arg("rm").arg(name))
        })
        .add_command(
            DockerCommand::docker()
                .args(["network", "rm"])
                .arg(&config.network),
        )
        .add_warning(format!(
            "{} and {} are shared by every project on this host",
            config.mysql_container, config.phpmyadmin_container
        ))
}

fn network_create(config: &RuntimeConfig) -> DockerCommand {
    DockerCommand::docker()
        .args(["network", "create", "--attachable"])
        .arg(&config.network)
}

fn up(config: &RuntimeConfig, layout: &ProjectLayout) -> CommandPlan {
    let vendor = layout.path(VENDOR_DIR);
    let mut plan = CommandPlan::new(format!("Create containers for {}", config.namespace));

    plan = match &config.image_path {
        Some(image) => plan
            .add_command(
                DockerCommand::docker()
                    .arg("load")
                    .opt("-i", Some(layout.resolve(image))),
            )
            .add_warning(format!(
                "{} is expected to contain the image {}",
                image.display(),
                config.wordpress_image
            )),
        None => plan.add_command(
            DockerCommand::docker()
                .arg("build")
                .args(["-t", config.wordpress_image.as_str()])
                .arg("-f")
                .arg(format!("{vendor}/docker/Dockerfile.php{}", config.php_version))
                .arg(&vendor),
        ),
    };

    if config.use_selenoid {
        plan = plan.add_command(
            DockerCommand::docker()
                .arg("build")
                .args(["-t", VIDEO_RECORDER_IMAGE])
                .arg("-f")
                .arg(format!(
                    "{vendor}/docker/video-recorder/Dockerfile.video-recorder"
                ))
                .arg(format!("{vendor}/docker/video-recorder")),
        );
    }

    plan = plan
        .add_command(network_create(config))
        .add_command(
            DockerCommand::docker()
                .args(["volume", "create"])
                .arg(config.mysql_volume),
        )
        .add_command(
            DockerCommand::docker()
                .args(["run", "-d", "--name", config.mysql_container])
                .args(["--network", config.network.as_str()])
                .args(["--env", "MYSQL_USER=admin"])
                .args(["--env", "MYSQL_PASSWORD=admin"])
                .args(["--env", "MYSQL_ROOT_PASSWORD=root"])
                .arg("-v")
                .arg(format!("{}:/var/lib/mysql", config.mysql_volume))
                .arg(format!("mysql:{}", config.mysql_version)),
        )
        .add_command(
            DockerCommand::docker()
                .args(["run", "-d", "--name", config.phpmyadmin_container])
                .args(["--network", config.network.as_str()])
                .arg("-p")
                .arg(format!("{PHPMYADMIN_PORT}:80"))
                .arg("-e")
                .arg(format!("PMA_HOST={}", config.mysql_container))
                .args(["-e", "MYSQL_ROOT_PASSWORD=root"])
                .arg(PHPMYADMIN_IMAGE),
        )
        .add_command(wordpress_run(config, layout, &vendor));

    if config.use_selenoid {
        plan = plan.add_command(selenoid_run(config, layout));
    }

    plan
}

fn wordpress_run(config: &RuntimeConfig, layout: &ProjectLayout, vendor: &str) -> DockerCommand {
    let src_dir = config.source_dir(&layout.dirname);
    let mut volumes = Vec::new();

    if config.project_type == ProjectType::Other {
        volumes.push(format!(
            "{}:{WP_ROOT}/wp-content/plugins/implementation-plugin",
            layout.path("tests/implementation-plugin")
        ));
    }
    volumes.push(format!("{}:{src_dir}", layout.working_dir.display()));

    for entry in &config.ssh {
        if let (Some(path), Some(filename)) = (&entry.private_key_path, &entry.private_key_filename) {
            volumes.push(format!("{}:{META_DIR}/ssh/{filename}", layout.resolve(path)));
        }
    }

    volumes.push(format!(
        "{vendor}/src/scripts/initwp.sh:/docker-entrypoint-initwp.d/initwp.sh"
    ));
    volumes.push(format!("{vendor}/src/scripts:{META_DIR}/scripts"));

    for script in &config.custom_init_scripts {
        let name = script
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        volumes.push(format!(
            "{}:{META_DIR}/user-scripts/{name}",
            layout.resolve(script)
        ));
    }
    volumes.push("/var/run/docker.sock:/var/run/docker.sock".to_string());

    let mut cmd = DockerCommand::docker()
        .args(["run", "-d", "--name", config.container.as_str()])
        .arg("--cap-add=SYS_ADMIN")
        .arg("--device=/dev/fuse")
        .args(["--security-opt", "apparmor=unconfined"])
        .arg("--add-host=host.docker.internal:host-gateway")
        .args(["--network", config.network.as_str()]);

    for (key, value) in container_env(config, layout, &src_dir) {
        cmd = cmd.arg("--env").arg(format!("{key}={value}"));
    }
    for volume in volumes {
        cmd = cmd.arg("-v").arg(volume);
    }

    cmd.arg(&config.wordpress_image)
}

fn selenoid_run(config: &RuntimeConfig, layout: &ProjectLayout) -> DockerCommand {
    let video = layout.path("tests/_output/video");
    let browsers = layout
        .has_browsers_json
        .then(|| format!("{}:/etc/selenoid/browsers.json:ro", layout.path("tests/browsers.json")));

    DockerCommand::docker()
        .args(["run", "-d", "--name", config.selenoid_container])
        .args(["--network", config.network.as_str()])
        .arg("--expose")
        .arg(config.selenoid_port.to_string())
        .args(["-v", "/var/run/docker.sock:/var/run/docker.sock"])
        .arg("-v")
        .arg(format!("{video}/:/opt/selenoid/video/"))
        .arg("-v")
        .arg(format!("{}/:/opt/selenoid/logs/", layout.path("tests/_output/logs")))
        .opt("-v", browsers)
        .arg("-e")
        .arg(format!("OVERRIDE_VIDEO_OUTPUT_DIR={video}/"))
        .arg(SELENOID_IMAGE)
        .args(["-container-network", config.network.as_str()])
        .args(["-log-output-dir", "/opt/selenoid/logs"])
        .args(["-video-recorder-image", VIDEO_RECORDER_IMAGE])
}

/// Environment passed to the WordPress container, in insertion order.
///
/// User `envvars` come first; tool-defined keys overwrite them, except the
/// boolean WordPress constants which the user may set.
#[must_use]
pub fn container_env(
    config: &RuntimeConfig,
    layout: &ProjectLayout,
    src_dir: &str,
) -> Vec<(String, String)> {
    let mut env = EnvList::default();
    for (key, value) in &config.envvars {
        env.set(key, value.to_string());
    }

    env.set("WPCODECEPT_META_DIR", META_DIR.to_string());
    env.set("WPCODECEPT_SCRIPTS_DIR", format!("{META_DIR}/scripts"));
    env.set("WPCODECEPT_SSH_DIR", format!("{META_DIR}/ssh"));
    env.set("WPCODECEPT_USER_SCRIPTS_DIR", format!("{META_DIR}/user-scripts"));
    env.set("WPCODECEPT_SRC_DIR", src_dir.to_string());
    env.set("VIDEO_OUTPUT_DIR", layout.path("tests/_output/video"));
    env.set("ACCEPTANCE_DB_NAME", config.acceptance_dbname.clone());
    env.set("INTEGRATION_DB_NAME", config.integration_dbname.clone());
    env.set(
        "RUNNING_FROM_CACHE",
        u8::from(config.image_path.is_some()).to_string(),
    );
    env.set("DOCKER_BRIDGE_IP", "host.docker.internal".to_string());
    env.set("FTP_CONFIGS", json_or_empty(&config.ftp));
    env.set("SSH_CONFIGS", json_or_empty(&config.ssh));

    let mut plugins = config.download_plugins.clone();
    plugins.push("relative-url".to_string());
    env.set("DOWNLOAD_PLUGINS", json_or_empty(&plugins));
    env.set("DOWNLOAD_THEMES", json_or_empty(&config.download_themes));

    env.set("DB_NAME", config.acceptance_dbname.clone());
    env.set("DB_HOST", config.mysql_container.to_string());
    env.set("DB_PASS", "root".to_string());
    for key in &BOOLEAN_WP_CONSTANTS[..3] {
        env.set(key, "true".to_string());
    }
    env.set("WP_LOCALE", config.language.clone());
    env.set("WP_VERSION", config.wordpress_version.clone());

    for (key, value) in &config.envvars {
        if BOOLEAN_WP_CONSTANTS.contains(&key.as_str()) {
            match value.to_string().as_str() {
                "true" | "1" => env.set(key, "true".to_string()),
                "false" | "0" => env.set(key, "false".to_string()),
                _ => {}
            }
        }
    }

    env.0
}

#[derive(Default)]
struct EnvList(Vec<(String, String)>);

impl EnvList {
    fn set(&mut self, key: &str, value: String) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.0.push((key.to_string(), value)),
        }
    }
}

fn json_or_empty<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
