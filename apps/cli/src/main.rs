//! # Talos CLI
//!
//! Command-line interface for Talos robot arm control.
//!
//! ## One-shot 模式
//!
//! ```bash
//! # 查询状态
//! talos-cli --host 192.168.1.1:502 status
//!
//! # 自动复归（复位错误 + 使能伺服）
//! talos-cli prepare
//!
//! # 点到点移动并等待到位
//! talos-cli move --pose 0.1,0.2,0.3,10,20,30 --speed 50
//!
//! # 连续 JOG（按 Ctrl-C 结束，自动发送停止）
//! talos-cli jog x plus
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use talos_driver::{
    CancelToken, ErrorWatchdog, JogAxis, JogDirection, MotionOptions, MotionOutcome, Pose,
    RobotCommand, Talos, TalosBuilder, TcpTransport,
};
use tracing::info;

/// Talos CLI - 机械臂命令行工具
#[derive(Parser, Debug)]
#[command(name = "talos-cli")]
#[command(about = "Command-line interface for Talos robot arm control", long_about = None)]
#[command(version)]
struct Cli {
    /// 控制器地址
    #[arg(long, global = true, default_value = "192.168.1.1:502")]
    host: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 查询机器人状态（位姿、就绪性、错误）
    Status,

    /// 查询当前 TCP 位姿
    Pose,

    /// 移动到目标位姿
    Move {
        /// 目标位姿：x,y,z,rx,ry,rz（米 / 度）
        #[arg(long)]
        pose: String,

        /// 速度（0~100）
        #[arg(long)]
        speed: Option<u8>,

        /// 加速度（0~100）
        #[arg(long)]
        accel: Option<u8>,

        /// 减速度（0~100）
        #[arg(long)]
        decel: Option<u8>,

        /// 直线运动（MovL；默认点到点 MovP）
        #[arg(long)]
        linear: bool,

        /// 派发后立即返回，不等待到位
        #[arg(long)]
        no_wait: bool,
    },

    /// 全关节原点复归
    Home {
        /// 派发后立即返回，不等待到位
        #[arg(long)]
        no_wait: bool,
    },

    /// 停止所有运动
    Stop,

    /// 连续 JOG
    Jog {
        /// JOG 轴
        axis: AxisArg,

        /// JOG 方向
        direction: DirectionArg,

        /// 保持时长（毫秒）；不指定则按住直到 Ctrl-C
        #[arg(long)]
        duration_ms: Option<u64>,
    },

    /// 吸盘控制
    Suction {
        /// on / off
        state: SuctionState,
    },

    /// 自动复归：复位错误锁存并使能全部伺服轴
    Prepare {
        /// 重试次数
        #[arg(long, default_value_t = 5)]
        retries: u32,

        /// 重试间隔（毫秒）
        #[arg(long, default_value_t = 1000)]
        delay_ms: u64,
    },

    /// 监控机器人状态（后台看门狗 + 周期打印）
    Monitor {
        /// 打印间隔（毫秒）
        #[arg(long, default_value_t = 500)]
        interval_ms: u64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AxisArg {
    X,
    Y,
    Z,
    Rx,
    Ry,
    Rz,
}

impl From<AxisArg> for JogAxis {
    fn from(axis: AxisArg) -> Self {
        match axis {
            AxisArg::X => JogAxis::X,
            AxisArg::Y => JogAxis::Y,
            AxisArg::Z => JogAxis::Z,
            AxisArg::Rx => JogAxis::Rx,
            AxisArg::Ry => JogAxis::Ry,
            AxisArg::Rz => JogAxis::Rz,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DirectionArg {
    Plus,
    Minus,
}

impl From<DirectionArg> for JogDirection {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Plus => JogDirection::Positive,
            DirectionArg::Minus => JogDirection::Negative,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SuctionState {
    On,
    Off,
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("talos_cli=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let talos = connect(&cli.host)?;

    match cli.command {
        Commands::Status => status(&talos),
        Commands::Pose => {
            println!("{}", talos.tcp_pose()?);
            Ok(())
        },
        Commands::Move {
            pose,
            speed,
            accel,
            decel,
            linear,
            no_wait,
        } => move_to(&talos, &pose, speed, accel, decel, linear, no_wait),
        Commands::Home { no_wait } => home(&talos, no_wait),
        Commands::Stop => {
            talos.motion_stop()?;
            println!("motion stop dispatched");
            Ok(())
        },
        Commands::Jog {
            axis,
            direction,
            duration_ms,
        } => jog(&talos, axis.into(), direction.into(), duration_ms),
        Commands::Suction { state } => {
            match state {
                SuctionState::On => talos.suction_on()?,
                SuctionState::Off => talos.suction_off()?,
            }
            println!("suction {:?}", state);
            Ok(())
        },
        Commands::Prepare { retries, delay_ms } => {
            let ready = talos.prepare_for_motion(retries, Duration::from_millis(delay_ms))?;
            if ready {
                println!("robot ready for motion");
                Ok(())
            } else {
                bail!("robot failed to reach ready state after {} attempts", retries)
            }
        },
        Commands::Monitor { interval_ms } => monitor(talos, Duration::from_millis(interval_ms)),
    }
}

fn connect(host: &str) -> Result<Talos<TcpTransport>> {
    let addr = host
        .parse()
        .with_context(|| format!("invalid controller address: {}", host))?;
    let talos = TalosBuilder::new()
        .connect(addr)
        .with_context(|| format!("cannot connect to {}", host))?;
    info!(%addr, "connected");
    Ok(talos)
}

fn status(talos: &Talos<TcpTransport>) -> Result<()> {
    println!("pose:           {}", talos.tcp_pose()?);
    println!("system state:   {:?}", talos.system_state()?);
    println!("operation mode: {:?}", talos.operation_mode()?);
    println!("teach panel:    {:?}", talos.teach_panel_state()?);
    match talos.not_ready_reason()? {
        None => println!("ready:          yes"),
        Some(reason) => println!("ready:          no ({})", reason),
    }
    Ok(())
}

fn move_to(
    talos: &Talos<TcpTransport>,
    pose: &str,
    speed: Option<u8>,
    accel: Option<u8>,
    decel: Option<u8>,
    linear: bool,
    no_wait: bool,
) -> Result<()> {
    let target = parse_pose(pose)?;
    let command = if linear {
        RobotCommand::MovL
    } else {
        RobotCommand::MovP
    };
    let options = MotionOptions {
        speed,
        acceleration: accel,
        deceleration: decel,
        blocking: Some(false),
        ..Default::default()
    };

    match talos.send_motion_command(command, Some(&target), &options)? {
        MotionOutcome::Rejected { reason } => bail!("robot refused the command: {}", reason),
        _ => {},
    }
    if no_wait {
        println!("dispatched {:?} to {}", command, target);
        return Ok(());
    }

    wait_interruptible(talos)?;
    println!("reached {}", target);
    Ok(())
}

fn home(talos: &Talos<TcpTransport>, no_wait: bool) -> Result<()> {
    match talos.send_motion_command(RobotCommand::HomeAllJoints, None, &MotionOptions {
        blocking: Some(false),
        ..Default::default()
    })? {
        MotionOutcome::Rejected { reason } => bail!("robot refused homing: {}", reason),
        _ => {},
    }
    if no_wait {
        println!("homing dispatched");
        return Ok(());
    }
    wait_interruptible(talos)?;
    println!("homing complete");
    Ok(())
}

/// 阻塞等待到位，Ctrl-C 通过取消令牌中止轮询
fn wait_interruptible(talos: &Talos<TcpTransport>) -> Result<()> {
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel()).context("cannot install ctrl-c handler")?;
    talos.wait_until_in_position(&cancel)?;
    Ok(())
}

fn jog(
    talos: &Talos<TcpTransport>,
    axis: JogAxis,
    direction: JogDirection,
    duration_ms: Option<u64>,
) -> Result<()> {
    match talos.jog(axis, direction)? {
        MotionOutcome::Rejected { reason } => bail!("robot refused jog: {}", reason),
        _ => {},
    }
    println!("jogging {:?} {:?}...", axis, direction);

    match duration_ms {
        Some(ms) => std::thread::sleep(Duration::from_millis(ms)),
        None => {
            // 按住直到 Ctrl-C
            let stop = Arc::new(AtomicBool::new(false));
            let handler_stop = stop.clone();
            ctrlc::set_handler(move || handler_stop.store(true, Ordering::Relaxed))
                .context("cannot install ctrl-c handler")?;
            while !stop.load(Ordering::Relaxed) {
                std::thread::sleep(Duration::from_millis(50));
            }
        },
    }

    talos.jog_stop()?;
    println!("jog stopped");
    Ok(())
}

fn monitor(talos: Talos<TcpTransport>, interval: Duration) -> Result<()> {
    let talos = Arc::new(talos);
    let watchdog = ErrorWatchdog::start(talos.clone());

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || handler_stop.store(true, Ordering::Relaxed))
        .context("cannot install ctrl-c handler")?;

    while !stop.load(Ordering::Relaxed) {
        if let Some(fault) = watchdog.try_fault() {
            bail!("robot fault: {}", fault);
        }
        println!(
            "pose {}  ready: {}",
            talos.tcp_pose()?,
            talos.is_ready_for_motion()?
        );
        std::thread::sleep(interval);
    }

    watchdog.stop();
    Ok(())
}

fn parse_pose(text: &str) -> Result<Pose> {
    let components: Vec<f64> = text
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("invalid pose: {}", text))?;
    if components.len() != 6 {
        bail!("pose needs exactly 6 components, got {}", components.len());
    }
    Ok(Pose::new(
        components[0],
        components[1],
        components[2],
        components[3],
        components[4],
        components[5],
    ))
}
