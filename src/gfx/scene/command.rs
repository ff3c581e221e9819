//! Viewer commands
//!
//! Every user interaction (menu entry, key press, window resize) maps to one
//! [`Command`]. Commands can also be parsed from text:
//!
//! | text                              | command                       |
//! |-----------------------------------|-------------------------------|
//! | `model 3`                         | [`Command::SelectModel`]      |
//! | `skybox 1`                        | [`Command::SelectSkybox`]     |
//! | `light-dir front-left`            | [`Command::SetLightDirection`]|
//! | `move point left 0.2`             | [`Command::MoveLight`]        |
//! | `rotate-skybox right 1`           | [`Command::RotateSkybox`]     |
//! | `lighting-mode`                   | [`Command::CycleLightingMode`]|
//! | `polygon line` / `polygon`        | set / cycle polygon mode      |
//! | `resize 800 600`                  | [`Command::Resize`]           |
//! | `quit`                            | [`Command::Quit`]             |
//!
//! Speeds are optional and default to the stock viewer speeds.

use std::fmt;
use std::str::FromStr;

use cgmath::Vector3;

use super::light::MoveDirection;

pub const DEFAULT_LIGHT_MOVE_SPEED: f32 = 0.2;
pub const DEFAULT_SKYBOX_ROTATION_SPEED: f32 = 1.0;

/// Preset directions for the directional light, named by where the light comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionPreset {
    Front,
    FrontRight,
    Right,
    BackRight,
    Back,
    BackLeft,
    Left,
    FrontLeft,
    Bottom,
    Top,
}

impl DirectionPreset {
    pub const ALL: [DirectionPreset; 10] = [
        DirectionPreset::Front,
        DirectionPreset::FrontRight,
        DirectionPreset::Right,
        DirectionPreset::BackRight,
        DirectionPreset::Back,
        DirectionPreset::BackLeft,
        DirectionPreset::Left,
        DirectionPreset::FrontLeft,
        DirectionPreset::Bottom,
        DirectionPreset::Top,
    ];

    /// Direction the light travels in (not normalized)
    pub fn vector(self) -> Vector3<f32> {
        match self {
            DirectionPreset::Front => Vector3::new(0.0, 0.0, -1.0),
            DirectionPreset::FrontRight => Vector3::new(-1.0, 0.0, -1.0),
            DirectionPreset::Right => Vector3::new(-1.0, 0.0, 0.0),
            DirectionPreset::BackRight => Vector3::new(-1.0, 0.0, 1.0),
            DirectionPreset::Back => Vector3::new(0.0, 0.0, 1.0),
            DirectionPreset::BackLeft => Vector3::new(1.0, 0.0, 1.0),
            DirectionPreset::Left => Vector3::new(1.0, 0.0, 0.0),
            DirectionPreset::FrontLeft => Vector3::new(1.0, 0.0, -1.0),
            DirectionPreset::Bottom => Vector3::new(0.0, 1.0, 0.0),
            DirectionPreset::Top => Vector3::new(0.0, -1.0, 0.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DirectionPreset::Front => "front",
            DirectionPreset::FrontRight => "front-right",
            DirectionPreset::Right => "right",
            DirectionPreset::BackRight => "back-right",
            DirectionPreset::Back => "back",
            DirectionPreset::BackLeft => "back-left",
            DirectionPreset::Left => "left",
            DirectionPreset::FrontLeft => "front-left",
            DirectionPreset::Bottom => "bottom",
            DirectionPreset::Top => "top",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightTarget {
    Point,
    Spot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolygonMode {
    Point,
    Line,
    #[default]
    Fill,
}

impl PolygonMode {
    /// Fill → Point → Line → Fill
    pub fn next(self) -> Self {
        match self {
            PolygonMode::Fill => PolygonMode::Point,
            PolygonMode::Point => PolygonMode::Line,
            PolygonMode::Line => PolygonMode::Fill,
        }
    }
}

impl From<PolygonMode> for wgpu::PolygonMode {
    fn from(mode: PolygonMode) -> Self {
        match mode {
            PolygonMode::Point => wgpu::PolygonMode::Point,
            PolygonMode::Line => wgpu::PolygonMode::Line,
            PolygonMode::Fill => wgpu::PolygonMode::Fill,
        }
    }
}

/// Which lights contribute to shading
///
/// 0 = all lights, 1 = directional only, 2 = point only, 3 = spot only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightingMode(u32);

impl LightingMode {
    pub const COUNT: u32 = 4;

    pub fn new(mode: u32) -> Self {
        Self(mode % Self::COUNT)
    }

    pub fn index(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Self {
        Self::new(self.0 + 1)
    }

    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "all lights",
            1 => "directional light",
            2 => "point light",
            _ => "spot light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SelectModel(usize),
    SelectSkybox(usize),
    SetLightDirection(DirectionPreset),
    MoveLight {
        target: LightTarget,
        direction: MoveDirection,
        speed: f32,
    },
    RotateSkybox {
        direction: RotateDirection,
        speed: f32,
    },
    CycleLightingMode,
    SetPolygonMode(PolygonMode),
    CyclePolygonMode,
    Resize {
        width: u32,
        height: u32,
    },
    Quit,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("`{command}` is missing its {argument}")]
    MissingArgument {
        command: String,
        argument: &'static str,
    },
    #[error("invalid {argument} `{value}` for `{command}`")]
    InvalidArgument {
        command: String,
        argument: &'static str,
        value: String,
    },
    #[error("unexpected trailing input `{0}`")]
    TrailingInput(String),
}

struct Args<'c, 'a> {
    command: &'c str,
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'_, 'a> {
    fn required(&mut self, argument: &'static str) -> Result<&'a str, ParseCommandError> {
        self.tokens
            .next()
            .ok_or_else(|| ParseCommandError::MissingArgument {
                command: self.command.to_string(),
                argument,
            })
    }

    fn parse<T: FromStr>(&mut self, argument: &'static str) -> Result<T, ParseCommandError> {
        let value = self.required(argument)?;
        self.convert(argument, value)
    }

    fn parse_or<T: FromStr>(
        &mut self,
        argument: &'static str,
        default: T,
    ) -> Result<T, ParseCommandError> {
        match self.tokens.next() {
            Some(value) => self.convert(argument, value),
            None => Ok(default),
        }
    }

    fn convert<T: FromStr>(
        &self,
        argument: &'static str,
        value: &str,
    ) -> Result<T, ParseCommandError> {
        value.parse().map_err(|_| self.invalid(argument, value))
    }

    fn invalid(&self, argument: &'static str, value: &str) -> ParseCommandError {
        ParseCommandError::InvalidArgument {
            command: self.command.to_string(),
            argument,
            value: value.to_string(),
        }
    }

    fn finish(mut self) -> Result<(), ParseCommandError> {
        match self.tokens.next() {
            Some(extra) => Err(ParseCommandError::TrailingInput(extra.to_string())),
            None => Ok(()),
        }
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let name = tokens.next().ok_or(ParseCommandError::Empty)?;

        let keyword = name.to_ascii_lowercase();
        let mut args = Args {
            command: &keyword,
            tokens,
        };

        let parsed = match keyword.as_str() {
            "model" => Command::SelectModel(args.parse("index")?),
            "skybox" => Command::SelectSkybox(args.parse("index")?),
            "light-dir" => {
                let value = args.required("direction")?;
                let preset = DirectionPreset::ALL
                    .into_iter()
                    .find(|preset| preset.name() == value)
                    .ok_or_else(|| args.invalid("direction", value))?;
                Command::SetLightDirection(preset)
            }
            "move" => {
                let value = args.required("light")?;
                let target = match value {
                    "point" => LightTarget::Point,
                    "spot" => LightTarget::Spot,
                    _ => return Err(args.invalid("light", value)),
                };
                let value = args.required("direction")?;
                let direction = match value {
                    "left" => MoveDirection::Left,
                    "right" => MoveDirection::Right,
                    "up" => MoveDirection::Up,
                    "down" => MoveDirection::Down,
                    _ => return Err(args.invalid("direction", value)),
                };
                let speed = args.parse_or("speed", DEFAULT_LIGHT_MOVE_SPEED)?;
                Command::MoveLight {
                    target,
                    direction,
                    speed,
                }
            }
            "rotate-skybox" => {
                let value = args.required("direction")?;
                let direction = match value {
                    "left" => RotateDirection::Left,
                    "right" => RotateDirection::Right,
                    _ => return Err(args.invalid("direction", value)),
                };
                let speed = args.parse_or("speed", DEFAULT_SKYBOX_ROTATION_SPEED)?;
                Command::RotateSkybox { direction, speed }
            }
            "lighting-mode" => Command::CycleLightingMode,
            "polygon" => match args.tokens.next() {
                None => Command::CyclePolygonMode,
                Some("point") => Command::SetPolygonMode(PolygonMode::Point),
                Some("line") => Command::SetPolygonMode(PolygonMode::Line),
                Some("fill") => Command::SetPolygonMode(PolygonMode::Fill),
                Some(value) => return Err(args.invalid("mode", value)),
            },
            "resize" => Command::Resize {
                width: args.parse("width")?,
                height: args.parse("height")?,
            },
            "quit" | "exit" => Command::Quit,
            _ => return Err(ParseCommandError::UnknownCommand(name.to_string())),
        };

        args.finish()?;
        Ok(parsed)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SelectModel(index) => write!(f, "model {}", index),
            Command::SelectSkybox(index) => write!(f, "skybox {}", index),
            Command::SetLightDirection(preset) => write!(f, "light-dir {}", preset.name()),
            Command::MoveLight {
                target,
                direction,
                speed,
            } => {
                let target = match target {
                    LightTarget::Point => "point",
                    LightTarget::Spot => "spot",
                };
                let direction = match direction {
                    MoveDirection::Left => "left",
                    MoveDirection::Right => "right",
                    MoveDirection::Up => "up",
                    MoveDirection::Down => "down",
                };
                write!(f, "move {} {} {}", target, direction, speed)
            }
            Command::RotateSkybox { direction, speed } => {
                let direction = match direction {
                    RotateDirection::Left => "left",
                    RotateDirection::Right => "right",
                };
                write!(f, "rotate-skybox {} {}", direction, speed)
            }
            Command::CycleLightingMode => write!(f, "lighting-mode"),
            Command::SetPolygonMode(mode) => {
                let mode = match mode {
                    PolygonMode::Point => "point",
                    PolygonMode::Line => "line",
                    PolygonMode::Fill => "fill",
                };
                write!(f, "polygon {}", mode)
            }
            Command::CyclePolygonMode => write!(f, "polygon"),
            Command::Resize { width, height } => write!(f, "resize {} {}", width, height),
            Command::Quit => write!(f, "quit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("model 3".parse::<Command>(), Ok(Command::SelectModel(3)));
        assert_eq!("skybox 0".parse::<Command>(), Ok(Command::SelectSkybox(0)));
        assert_eq!(
            "light-dir front-left".parse::<Command>(),
            Ok(Command::SetLightDirection(DirectionPreset::FrontLeft))
        );
        assert_eq!(
            "move spot up 0.5".parse::<Command>(),
            Ok(Command::MoveLight {
                target: LightTarget::Spot,
                direction: MoveDirection::Up,
                speed: 0.5
            })
        );
        assert_eq!(
            "rotate-skybox left".parse::<Command>(),
            Ok(Command::RotateSkybox {
                direction: RotateDirection::Left,
                speed: DEFAULT_SKYBOX_ROTATION_SPEED
            })
        );
        assert_eq!("lighting-mode".parse::<Command>(), Ok(Command::CycleLightingMode));
        assert_eq!("polygon".parse::<Command>(), Ok(Command::CyclePolygonMode));
        assert_eq!(
            "polygon line".parse::<Command>(),
            Ok(Command::SetPolygonMode(PolygonMode::Line))
        );
        assert_eq!(
            "resize 800 600".parse::<Command>(),
            Ok(Command::Resize {
                width: 800,
                height: 600
            })
        );
        assert_eq!("QUIT".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "jump".parse::<Command>(),
            Err(ParseCommandError::UnknownCommand("jump".into()))
        );
        assert_eq!(
            "model".parse::<Command>(),
            Err(ParseCommandError::MissingArgument {
                command: "model".into(),
                argument: "index"
            })
        );
        assert_eq!(
            "model -1".parse::<Command>(),
            Err(ParseCommandError::InvalidArgument {
                command: "model".into(),
                argument: "index",
                value: "-1".into()
            })
        );
        assert!(matches!(
            "move sun left".parse::<Command>(),
            Err(ParseCommandError::InvalidArgument { argument: "light", .. })
        ));
        assert!(matches!(
            "light-dir sideways".parse::<Command>(),
            Err(ParseCommandError::InvalidArgument { .. })
        ));
        assert_eq!(
            "quit now".parse::<Command>(),
            Err(ParseCommandError::TrailingInput("now".into()))
        );
        assert_eq!(
            "SKYBOX x".parse::<Command>(),
            Err(ParseCommandError::InvalidArgument {
                command: "skybox".into(),
                argument: "index",
                value: "x".into()
            })
        );
        assert_eq!(
            "models 1".parse::<Command>(),
            Err(ParseCommandError::UnknownCommand("models".into()))
        );
        assert_eq!("Exit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_display_parses_back() {
        let commands = [
            Command::SetLightDirection(DirectionPreset::BackRight),
            Command::MoveLight {
                target: LightTarget::Point,
                direction: MoveDirection::Down,
                speed: 0.25,
            },
            Command::SetPolygonMode(PolygonMode::Point),
            Command::Resize {
                width: 1,
                height: 2,
            },
        ];
        for command in commands {
            assert_eq!(command.to_string().parse::<Command>(), Ok(command));
        }
    }

    #[test]
    fn test_modes_wrap() {
        let mut mode = LightingMode::default();
        for _ in 0..LightingMode::COUNT {
            mode = mode.next();
        }
        assert_eq!(mode, LightingMode::default());
        assert_eq!(LightingMode::new(5).index(), 1);

        assert_eq!(PolygonMode::Line.next(), PolygonMode::Fill);
        assert_eq!(wgpu::PolygonMode::from(PolygonMode::Point), wgpu::PolygonMode::Point);
    }

    #[test]
    fn test_presets() {
        assert_eq!(DirectionPreset::ALL.len(), 10);
        assert_eq!(DirectionPreset::Top.vector(), Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(DirectionPreset::FrontRight.vector(), Vector3::new(-1.0, 0.0, -1.0));
    }
}
