use blog_autopilot::core::composer::post_file_name;
use blog_autopilot::core::{ArticleRequest, BlogPost, Storage};
use blog_autopilot::utils::logger;
use blog_autopilot::{
    send_blog_notification, AppConfig, ArticleComposer, BlogError, CliConfig, Command,
    LocalStorage, NotificationDispatcher,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting blog-autopilot");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.app_config() {
        Ok(config) => config,
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Command::Article {
            title,
            focus_keyword,
            permalink,
            semantic_keywords,
            output_dir,
            image_prompt,
        } => {
            let request = ArticleRequest {
                title,
                focus_keyword,
                permalink,
                semantic_keywords,
            };
            let output_dir = output_dir.unwrap_or_else(|| config.blog.posts_dir.clone());
            if let Err(e) = write_article(&config, &request, &output_dir, image_prompt).await {
                report(&e);
                std::process::exit(2);
            }
        }
        Command::ImagePrompt { title } => {
            if let Err(e) = print_image_prompt(&config, &title).await {
                report(&e);
                std::process::exit(2);
            }
        }
        Command::Notify {
            title,
            focus_keyword,
            permalink,
            image_url,
        } => {
            let post = BlogPost {
                title,
                focus_keyword,
                permalink,
                image_url,
            };
            if send_blog_notification(&config.onesignal, &config.blog, &post)
                .await
                .is_none()
            {
                eprintln!("✗ Failed to send notification");
                std::process::exit(1);
            }
            println!("✅ Notification sent for {}", post.url(&config.blog.site_url));
        }
        Command::Send {
            title,
            message,
            url,
            image_url,
            segments,
            player_ids,
        } => {
            let dispatcher = match NotificationDispatcher::from_config(&config.onesignal) {
                Ok(dispatcher) => dispatcher,
                Err(e) => {
                    report(&e);
                    std::process::exit(1);
                }
            };
            let receipt = dispatcher
                .send_notification(
                    &title,
                    &message,
                    url.as_deref(),
                    image_url.as_deref(),
                    Some(segments),
                    Some(player_ids),
                )
                .await;
            match receipt {
                Some(receipt) => println!("{}", serde_json::to_string_pretty(&receipt)?),
                None => {
                    eprintln!("✗ Failed to send notification");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

async fn print_image_prompt(config: &AppConfig, title: &str) -> Result<(), BlogError> {
    let composer = ArticleComposer::from_config(config)?;
    let prompt = composer.generate_image_prompt(title).await?;
    println!("{}", prompt);
    Ok(())
}

async fn write_article(
    config: &AppConfig,
    request: &ArticleRequest,
    output_dir: &str,
    with_image_prompt: bool,
) -> Result<(), BlogError> {
    let composer = ArticleComposer::from_config(config)?;

    let article = composer.generate_article(request).await?;

    let storage = LocalStorage::new(output_dir.to_string());
    let file_name = post_file_name(&request.permalink, chrono::Local::now().date_naive());
    storage
        .write_file(&file_name, article.render().as_bytes())
        .await?;

    let path = storage.full_path(&file_name);
    tracing::info!("📁 Article saved to: {}", path.display());
    println!("📁 {}", path.display());

    if with_image_prompt {
        let prompt = composer.generate_image_prompt(&request.title).await?;
        println!("🎨 {}", prompt);
    }

    Ok(())
}

fn report(e: &BlogError) {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e);
    eprintln!("💡 {}", e.recovery_suggestion());
}
