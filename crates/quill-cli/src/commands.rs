use quill_server::{QuillServer, ServerConfig};
use quill_store::{ContentStore, LocalFileStore};
use quill_types::{AuthorRef, Category, Hero, Post, PostMetadata, POST_TYPE};

use crate::cli::{Cli, Command, SeedArgs, ServeArgs};

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Seed(args) => seed(args).await,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = ServerConfig::from_env()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    QuillServer::new(config).serve().await?;
    Ok(())
}

async fn seed(args: SeedArgs) -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;
    let dir = args.dir.unwrap_or(config.posts_dir);
    let store = LocalFileStore::new(&dir);
    let post = sample_post();
    store.insert_post(&post).await?;
    println!(
        "Wrote sample post to {}",
        dir.join(format!("{}.json", post.slug)).display()
    );
    Ok(())
}

fn sample_post() -> Post {
    Post {
        id: "exploring-the-wonders".to_string(),
        object_type: POST_TYPE.to_string(),
        slug: "exploring-the-wonders".to_string(),
        title: "Exploring the World's Natural Wonders: A Nature Lover's Journey".to_string(),
        created_at: None,
        metadata: PostMetadata {
            published_date: "2025-10-24".to_string(),
            teaser: "A short intro about exploring the world's natural wonders.".to_string(),
            content: "<p>As someone who loves nature, there's nothing quite like the thrill of \
                      exploring the world's most beautiful landscapes.</p>"
                .to_string(),
            hero: Hero {
                imgix_url: "https://images.unsplash.com/photo-1501785888041-af3ef285b470"
                    .to_string(),
            },
            author: AuthorRef {
                title: "Jane Doe".to_string(),
                slug: Some("jane-doe".to_string()),
            },
            categories: vec![
                Category {
                    title: "Environment".to_string(),
                },
                Category {
                    title: "Travel".to_string(),
                },
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seed_writes_sample_post() {
        let dir = tempfile::tempdir().unwrap();
        seed(SeedArgs {
            dir: Some(dir.path().to_path_buf()),
        })
        .await
        .unwrap();

        let store = LocalFileStore::new(dir.path());
        let post = store
            .get_post("exploring-the-wonders")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(post.metadata.author.title, "Jane Doe");
        assert_eq!(post.metadata.categories.len(), 2);
    }

    #[test]
    fn sample_slug_matches_derivation_style() {
        let post = sample_post();
        assert!(!post.slug.is_empty());
        assert!(post
            .slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }
}
