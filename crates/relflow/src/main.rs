mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;

#[derive(Parser)]
#[command(name = "relflow")]
#[command(about = "リリースから Docker イメージを作る。", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dockerfile を生成して標準出力に表示
    Render,
    /// Dockerfile を生成して _build/docker/Dockerfile に書き込む
    Write,
    /// Dockerfile を書き込み、イメージをビルド
    Build {
        /// イメージタグ（省略時は docker.tag、なければ <project>:latest）
        #[arg(short, long)]
        tag: Option<String>,
        /// ビルドツール（省略時は docker.build_tool、なければ docker）
        #[arg(long, env = "RELFLOW_BUILD_TOOL")]
        build_tool: Option<String>,
    },
    /// パッケージングパイプラインから呼ばれるフック
    #[command(subcommand)]
    Hook(HookCommands),
    /// 解決済みの設定を JSON で表示
    Config,
    /// バージョン情報を表示
    Version,
}

#[derive(Subcommand)]
enum HookCommands {
    /// パッケージング前: docker が有効なら Dockerfile を書き込む
    #[command(name = "pre-package")]
    PrePackage,
    /// パッケージング後: docker が有効ならイメージをビルド
    #[command(name = "post-package")]
    PostPackage {
        /// イメージタグ
        #[arg(short, long)]
        tag: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ログは stderr へ。stdout はビルド出力の中継に使う
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Versionコマンドは設定ファイル不要
    if matches!(cli.command, Commands::Version) {
        println!("relflow {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let (project, project_root) = relflow_core::load_project()?;
    tracing::debug!(project = %project.name, root = %project_root.display(), "Loaded project");

    let result = match cli.command {
        Commands::Render => commands::render::handle(&project),
        Commands::Write => commands::write::handle(&project, &project_root),
        Commands::Build { tag, build_tool } => {
            commands::build::handle(&project, &project_root, tag.as_deref(), build_tool.as_deref())
                .await
        }
        Commands::Hook(HookCommands::PrePackage) => {
            commands::hook::handle_pre_package(&project, &project_root)
        }
        Commands::Hook(HookCommands::PostPackage { tag }) => {
            commands::hook::handle_post_package(&project, &project_root, tag.as_deref()).await
        }
        Commands::Config => commands::config::handle(&project, &project_root),
        Commands::Version => Ok(()),
    };

    // ビルドエラーは解決方法付きで表示して終了
    if let Err(e) = &result
        && let Some(build_error) = e.downcast_ref::<relflow_build::BuildError>()
    {
        eprintln!("{} {}", "✗".red().bold(), build_error.user_message());
        std::process::exit(1);
    }

    result
}
