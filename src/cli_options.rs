use std::collections::HashMap;

pub struct CliOptions {
    pub scene_file: Option<String>,
    pub width: usize,
    pub height: usize,
    pub depth: i32,
    pub output: String,
    pub use_multi_thread: bool,
    pub help: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            scene_file: None,
            width: 640,
            height: 480,
            depth: 1,
            output: "output.png".to_string(),
            use_multi_thread: true,
            help: false,
        }
    }
}

impl CliOptions {
    pub fn message() -> &'static str {
        r#"<scene_file>
        --width <pixels>
        --height <pixels>
        --depth <max_recursion_depth>
        --output <file.png>
        --use_multi_thread | --use_single_thread
        "#
    }
}

fn numeric<T: std::str::FromStr>(key: &str, value: Option<String>) -> Result<T, String> {
    value
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| format!("{} needs a numeric value", key))
}

pub fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut pairs: HashMap<String, Option<String>> = HashMap::new();
    let mut options = CliOptions::default();
    let mut args = args.into_iter().rev().collect::<Vec<_>>();
    args.pop(); // Removes args[0]

    while let Some(key) = args.pop() {
        if !key.starts_with('-') {
            if options.scene_file.is_some() {
                return Err(format!("More than one scene file given: {}", key));
            }
            options.scene_file = Some(key);
            continue;
        }
        match args.last() {
            None => {
                pairs.insert(key, None);
            }
            Some(value) => {
                if value.starts_with('-') {
                    pairs.insert(key, None);
                } else {
                    let value = args.pop();
                    pairs.insert(key, value);
                }
            }
        }
    }
    for (k, v) in pairs.into_iter() {
        match k.as_str() {
            "--width" => options.width = numeric(&k, v)?,
            "--height" => options.height = numeric(&k, v)?,
            "--depth" => options.depth = numeric(&k, v)?,
            "--output" => match v {
                Some(path) => options.output = path,
                None => return Err("--output needs a file name".to_string()),
            },
            "--use_multi_thread" => options.use_multi_thread = true,
            "--use_single_thread" => options.use_multi_thread = false,
            "--help" => options.help = true,
            _ => return Err(format!("Unrecognized key {}", k)),
        }
    }
    Ok(options)
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("whitted-rt")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults_apply_without_flags() {
        let options = parse_args(args(&["room.txt"])).unwrap();
        assert_eq!(options.scene_file.as_deref(), Some("room.txt"));
        assert_eq!((options.width, options.height), (640, 480));
        assert_eq!(options.depth, 1);
        assert!(options.use_multi_thread);
    }

    #[test]
    fn flags_override_defaults() {
        let options = parse_args(args(&[
            "room.txt",
            "--width",
            "800",
            "--depth",
            "3",
            "--use_single_thread",
        ]))
        .unwrap();
        assert_eq!(options.width, 800);
        assert_eq!(options.depth, 3);
        assert!(!options.use_multi_thread);
    }

    #[test]
    fn help_is_reported_instead_of_rendering() {
        let options = parse_args(args(&["--help"])).unwrap();
        assert!(options.help);
        assert!(!parse_args(args(&["room.txt"])).unwrap().help);
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert!(parse_args(args(&["room.txt", "--width", "wide"])).is_err());
        assert!(parse_args(args(&["room.txt", "--width"])).is_err());
    }
}
