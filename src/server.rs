use std::path::PathBuf;
use std::sync::Arc;
use std::{fs, io};

use anyhow::Result;
use ntex::web;
use ntex_files::NamedFile;
use percent_encoding::percent_decode_str;
use spdlog::info;

use crate::config::Config;
use crate::content::{ContentItem, ContentStore, SiteContent};
use crate::day_groups::group_by_day;
use crate::tags::{collect_tags, filter_by_tag};
use crate::view::atom_renderer::AtomFeed;
use crate::view::list_renderer::ListRenderer;
use crate::view::post_renderer::PostRenderer;
use crate::view::talks_renderer::TalksRenderer;

struct AppState {
    store: ContentStore,
    config: Config,
}

fn read_template(tpl_dir: &PathBuf, file_name: &str) -> io::Result<String> {
    let full_path = tpl_dir.join(file_name);
    fs::read_to_string(full_path)
}

fn html_ok(body: String) -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

async fn load_content(state: &AppState) -> Result<Arc<SiteContent>, web::HttpResponse> {
    match state.store.load().await {
        Ok(content) => Ok(content),
        Err(e) => Err(web::HttpResponse::InternalServerError()
            .body(format!("Error loading content: {}", e))),
    }
}

fn render_day_list(config: &Config, items: &[Arc<ContentItem>]) -> io::Result<String> {
    let groups = group_by_day(items);
    let tags = collect_tags(items);
    let template_src = read_template(&config.paths.template_dir, "list.tpl")?;
    let renderer = ListRenderer::new(&template_src)?;
    renderer.render(&config.site.title, &groups, tags)
}

#[web::get("/")]
async fn index(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let content = match load_content(&state).await {
        Ok(content) => content,
        Err(response) => return response,
    };

    let timeline = content.timeline();
    match render_day_list(&state.config, &timeline) {
        Ok(page) => html_ok(page),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering timeline: {}", e)),
    }
}

#[web::get("/tags/{tag}")]
async fn tag_page(
    path: web::types::Path<String>,
    state: web::types::State<Arc<AppState>>,
) -> web::HttpResponse {
    let raw_tag = path.into_inner();
    let tag = match percent_decode_str(&raw_tag).decode_utf8() {
        Ok(tag) => tag.to_string(),
        Err(_) => return web::HttpResponse::BadRequest().body("Invalid tag encoding"),
    };

    let content = match load_content(&state).await {
        Ok(content) => content,
        Err(response) => return response,
    };

    let tagged = filter_by_tag(&content.timeline(), &tag);
    if tagged.is_empty() {
        return web::HttpResponse::NotFound().body(format!("No content tagged {}", tag));
    }

    match render_day_list(&state.config, &tagged) {
        Ok(page) => html_ok(page),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering tag {}: {}", tag, e)),
    }
}

#[web::get("/post/{slug}")]
async fn view(
    path: web::types::Path<String>,
    state: web::types::State<Arc<AppState>>,
) -> web::HttpResponse {
    let slug = path.into_inner();
    let content = match load_content(&state).await {
        Ok(content) => content,
        Err(response) => return response,
    };

    let item = match content.find_by_slug(&slug) {
        Some(item) => item,
        None => {
            return web::HttpResponse::NotFound().body(format!("No post found with slug {}", slug));
        }
    };

    let rendered = read_template(&state.config.paths.template_dir, "view.tpl")
        .and_then(|template_src| {
            let renderer = PostRenderer::new(&template_src)?;
            renderer.render(&item)
        });

    match rendered {
        Ok(page) => html_ok(page),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering post {}: {}", slug, e)),
    }
}

#[web::get("/talks")]
async fn talks(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let content = match load_content(&state).await {
        Ok(content) => content,
        Err(response) => return response,
    };

    let rendered = read_template(&state.config.paths.template_dir, "talks.tpl")
        .and_then(|template_src| {
            let renderer = TalksRenderer::new(&template_src)?;
            Ok(renderer.render(&state.config.site.title, &content.talks))
        });

    match rendered {
        Ok(page) => html_ok(page),
        Err(e) => {
            web::HttpResponse::InternalServerError().body(format!("Error rendering talks: {}", e))
        }
    }
}

fn feed_response(
    config: &Config,
    feed_title: &str,
    items: &[Arc<ContentItem>],
) -> web::HttpResponse {
    let feed = AtomFeed {
        feed_title,
        site_url: config.site.base_url.as_str(),
        feed_desc: config.site.description.as_str(),
        author: config.site.author.as_str(),
    };

    match feed.render(items) {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/atom+xml; charset=utf-8")
            .body(xml),
        Err(e) => {
            web::HttpResponse::InternalServerError().body(format!("Error rendering feed: {}", e))
        }
    }
}

#[web::get("/atom/posts.xml")]
async fn atom_posts(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let content = match load_content(&state).await {
        Ok(content) => content,
        Err(response) => return response,
    };

    let title = format!("{} - Posts", state.config.site.title);
    feed_response(&state.config, &title, &content.posts)
}

#[web::get("/atom/thoughts.xml")]
async fn atom_thoughts(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let content = match load_content(&state).await {
        Ok(content) => content,
        Err(response) => return response,
    };

    let title = format!("{} - Thoughts", state.config.site.title);
    feed_response(&state.config, &title, &content.thoughts)
}

#[web::get("/atom/all.xml")]
async fn atom_all(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let content = match load_content(&state).await {
        Ok(content) => content,
        Err(response) => return response,
    };

    feed_response(&state.config, &state.config.site.title, &content.timeline())
}

#[web::get("/public/{file_name}")]
async fn public_files(
    path: web::types::Path<String>,
    state: web::types::State<Arc<AppState>>,
) -> Result<NamedFile, web::Error> {
    if path.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join(path.into_inner());

    Ok(NamedFile::open(file_path)?)
}

pub async fn server_run(config: Config) -> Result<()> {
    let store = ContentStore::new(
        config.paths.content_dir.clone(),
        config.frontmatter_options(),
    );

    // A broken content file stops the server from starting instead of
    // surfacing as a 500 on the first request
    let content = store.load().await?;
    info!(
        "Serving {} posts, {} thoughts, {} talks",
        content.posts.len(),
        content.thoughts.len(),
        content.talks.len()
    );

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState { store, config });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(tag_page)
            .service(view)
            .service(talks)
            .service(atom_posts)
            .service(atom_thoughts)
            .service(atom_all)
            .service(public_files)
    })
    .bind((bind_addr, bind_port))?
    .run()
    .await?;

    Ok(())
}
