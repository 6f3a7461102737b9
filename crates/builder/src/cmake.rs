//! CMake command templates
//!
//! Both commands are plain substitutions of the request into fixed argument
//! lists. The output directory and target name are passed as their own argv
//! entries exactly as given.

use cbuild_platform::PlatformCommand;
use cbuild_types::InvocationRequest;

use crate::settings::CMakeSettings;

/// Configure step:
/// `cmake -DCMAKE_BUILD_TYPE=<type> -S <source_dir> -B <output_dir> [-G <gen>] [-DCMAKE_MAKE_PROGRAM=<p>] [-D...]`
#[must_use]
pub fn configure_command(settings: &CMakeSettings, request: &InvocationRequest) -> PlatformCommand {
    let mut cmd = PlatformCommand::new(&settings.program);
    cmd.arg(format!("-DCMAKE_BUILD_TYPE={}", settings.build_type));
    cmd.arg("-S").arg(&settings.source_dir);
    cmd.arg("-B").arg(&request.output_dir);

    if let Some(generator) = &settings.generator {
        cmd.arg("-G").arg(generator);
    }

    if let Some(make_program) = &settings.make_program {
        cmd.arg(format!("-DCMAKE_MAKE_PROGRAM={make_program}"));
    }

    for define in &settings.defines {
        cmd.arg(define.to_arg());
    }

    cmd
}

/// Build step: `cmake --build <output_dir> --target <target> [--parallel <jobs>]`
#[must_use]
pub fn build_command(settings: &CMakeSettings, request: &InvocationRequest) -> PlatformCommand {
    let mut cmd = PlatformCommand::new(&settings.program);
    cmd.arg("--build").arg(&request.output_dir);
    cmd.arg("--target").arg(&request.target);

    if let Some(jobs) = settings.jobs {
        cmd.arg("--parallel").arg(jobs.to_string());
    }

    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbuild_types::CacheDefine;

    fn args(cmd: &PlatformCommand) -> Vec<String> {
        cmd.args_lossy()
    }

    #[test]
    fn test_default_configure_command() {
        let request = InvocationRequest::new("build", "app");
        let cmd = configure_command(&CMakeSettings::default(), &request);

        assert_eq!(cmd.program(), "cmake");
        assert_eq!(
            args(&cmd),
            ["-DCMAKE_BUILD_TYPE=Debug", "-S", "./src", "-B", "build"]
        );
    }

    #[test]
    fn test_default_build_command() {
        let request = InvocationRequest::new("build", "app");
        let cmd = build_command(&CMakeSettings::default(), &request);

        assert_eq!(cmd.program(), "cmake");
        assert_eq!(args(&cmd), ["--build", "build", "--target", "app"]);
    }

    #[test]
    fn test_optional_configure_arguments_follow_fixed_ones() {
        let settings = CMakeSettings {
            generator: Some("Ninja".to_string()),
            make_program: Some("ninja".to_string()),
            defines: vec![CacheDefine::new("BUILD_TESTING", "OFF")],
            ..CMakeSettings::default()
        };
        let request = InvocationRequest::new("out", "t");
        let cmd = configure_command(&settings, &request);

        assert_eq!(
            args(&cmd),
            [
                "-DCMAKE_BUILD_TYPE=Debug",
                "-S",
                "./src",
                "-B",
                "out",
                "-G",
                "Ninja",
                "-DCMAKE_MAKE_PROGRAM=ninja",
                "-DBUILD_TESTING=OFF",
            ]
        );
    }

    #[test]
    fn test_parallel_jobs_on_build_only() {
        let settings = CMakeSettings {
            jobs: Some(4),
            ..CMakeSettings::default()
        };
        let request = InvocationRequest::new("out", "t");

        assert!(!args(&configure_command(&settings, &request)).contains(&"--parallel".to_string()));
        assert_eq!(
            args(&build_command(&settings, &request)),
            ["--build", "out", "--target", "t", "--parallel", "4"]
        );
    }

    #[test]
    fn test_hostile_values_pass_through_unchanged() {
        let request = InvocationRequest::new("my out; rm -rf ~", "--help $(whoami)");
        let settings = CMakeSettings::default();

        let configure = configure_command(&settings, &request);
        let build = build_command(&settings, &request);

        assert_eq!(args(&configure)[4], "my out; rm -rf ~");
        assert_eq!(args(&build)[1], "my out; rm -rf ~");
        assert_eq!(args(&build)[3], "--help $(whoami)");
    }
}
