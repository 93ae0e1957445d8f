use std::path::PathBuf;
use std::process;

use clap::Parser;
use dotenv::dotenv;
use tracing::{error, info};

use rocket_mission::app_config::credentials::{load_credentials, CredentialsState};
use rocket_mission::app_config::db::init_db;
use rocket_mission::app_config::log::setup_logging;
use rocket_mission::app_config::mission::MissionSettings;
use rocket_mission::error::{exit_code_of, UNKNOWN_ERROR_EXIT_CODE};
use rocket_mission::rocket::RocketClient;
use rocket_mission::services::{MissionService, ReconcileOutcome};
use rocket_mission::store::RbatisPredictionStore;

/// 同步 `sw_production` 回测任务：扩展已有任务或新建任务
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// 登录凭证配置文件
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,
}

async fn run(args: &Args) -> anyhow::Result<i32> {
    let credentials = match load_credentials(&args.config)? {
        CredentialsState::Ready(credentials) => credentials,
        state @ CredentialsState::Created(_) => {
            error!(
                "未找到配置文件, 已在 `{}` 生成模板, 请填写登录凭证后重新运行",
                args.config.display()
            );
            return Ok(state.exit_code());
        }
        state @ CredentialsState::Unfilled(_) => {
            error!("请在配置文件 `{}` 中填写登录凭证", args.config.display());
            return Ok(state.exit_code());
        }
    };
    let settings = MissionSettings::from_env()?;

    let client = RocketClient::new(credentials.base_url())?;
    client.login(&credentials.user, &credentials.password).await?;

    let store = RbatisPredictionStore::new(init_db().await?);
    let service = MissionService::new(Box::new(client), Box::new(store), settings);

    let report = service.reconcile().await?;
    match report.outcome {
        ReconcileOutcome::Expanded {
            expanded,
            up_to_date,
        } => info!(
            "扩展任务 {} 个, 无需扩展 {} 个",
            expanded.len(),
            up_to_date
        ),
        ReconcileOutcome::Created { mission_id } => info!(
            "新建任务 mission id: `{}`",
            mission_id.unwrap_or_default()
        ),
    }
    Ok(0)
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let args = Args::parse();

    let guards = match setup_logging() {
        Ok(guards) => guards,
        Err(e) => {
            eprintln!("日志初始化失败: {}", e);
            process::exit(UNKNOWN_ERROR_EXIT_CODE);
        }
    };

    let code = match run(&args).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            exit_code_of(&e)
        }
    };
    if code == 0 {
        info!("DONE");
    } else {
        info!("ABORTED {}", code);
    }

    drop(guards);
    process::exit(code);
}
