//! Built-in default navigation data
//!
//! Used when neither remote storage nor a local backup provides a collection,
//! and by `reset`. Callers receive a fresh copy each time.

use super::types::{Category, Collection, Site};

fn site(id: &str, name: &str, url: &str, description: &str, icon: &str, tags: &[&str]) -> Site {
    Site {
        id: id.to_string(),
        name: name.to_string(),
        url: url.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
    }
}

fn category(id: &str, name: &str, icon: &str, color: &str, sites: Vec<Site>) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        color: Some(color.to_string()),
        sites,
    }
}

/// The default collection shipped with the application
pub fn default_categories() -> Collection {
    vec![
        category(
            "tools",
            "Tools",
            "fas fa-tools",
            "#667eea",
            vec![
                site(
                    "google-translate",
                    "Google Translate",
                    "https://translate.google.com",
                    "Online translation between many languages",
                    "fas fa-language",
                    &["translation", "language", "tools"],
                ),
                site(
                    "figma",
                    "Figma",
                    "https://www.figma.com",
                    "Collaborative UI/UX design tool",
                    "fas fa-palette",
                    &["design", "UI", "UX", "collaboration"],
                ),
                site(
                    "github",
                    "GitHub",
                    "https://github.com",
                    "The largest code hosting platform",
                    "fab fa-github",
                    &["code", "Git", "open source", "collaboration"],
                ),
                site(
                    "json-formatter",
                    "JSON Formatter",
                    "https://jsonformatter.org",
                    "Format and validate JSON documents",
                    "fas fa-code",
                    &["JSON", "formatting", "validation"],
                ),
                site(
                    "tinypng",
                    "TinyPNG",
                    "https://tinypng.com",
                    "Smart image compression",
                    "fas fa-compress",
                    &["images", "compression", "optimization"],
                ),
                site(
                    "caniuse",
                    "Can I Use",
                    "https://caniuse.com",
                    "Browser compatibility tables",
                    "fas fa-browser",
                    &["compatibility", "browser", "CSS", "JavaScript"],
                ),
            ],
        ),
        category(
            "development",
            "Development",
            "fas fa-code",
            "#764ba2",
            vec![
                site(
                    "stackoverflow",
                    "Stack Overflow",
                    "https://stackoverflow.com",
                    "Questions and answers for programmers",
                    "fab fa-stack-overflow",
                    &["Q&A", "programming", "community"],
                ),
                site(
                    "mdn",
                    "MDN Web Docs",
                    "https://developer.mozilla.org",
                    "Reference documentation for the web platform",
                    "fab fa-firefox",
                    &["docs", "Web", "JavaScript", "CSS", "HTML"],
                ),
                site(
                    "nodejs",
                    "Node.js",
                    "https://nodejs.org",
                    "Server-side JavaScript runtime",
                    "fab fa-node-js",
                    &["JavaScript", "server", "runtime"],
                ),
                site(
                    "codepen",
                    "CodePen",
                    "https://codepen.io",
                    "Front-end playground and showcase",
                    "fab fa-codepen",
                    &["front-end", "demo", "sharing", "HTML", "CSS", "JavaScript"],
                ),
                site(
                    "vuejs",
                    "Vue.js",
                    "https://vuejs.org",
                    "The progressive JavaScript framework",
                    "fab fa-vuejs",
                    &["Vue", "JavaScript", "front-end", "framework"],
                ),
                site(
                    "vite",
                    "Vite",
                    "https://vitejs.dev",
                    "Next generation front-end tooling",
                    "fas fa-bolt",
                    &["build tools", "front-end", "fast"],
                ),
            ],
        ),
        category(
            "learning",
            "Learning",
            "fas fa-graduation-cap",
            "#f093fb",
            vec![
                site(
                    "coursera",
                    "Coursera",
                    "https://www.coursera.org",
                    "Online courses from universities",
                    "fas fa-play-circle",
                    &["courses", "learning", "education"],
                ),
                site(
                    "youtube",
                    "YouTube",
                    "https://www.youtube.com",
                    "Video sharing platform",
                    "fab fa-youtube",
                    &["video", "learning", "tutorials"],
                ),
                site(
                    "leetcode",
                    "LeetCode",
                    "https://leetcode.com",
                    "Algorithm and data structure practice",
                    "fas fa-code",
                    &["algorithms", "data structures", "programming", "interviews"],
                ),
                site(
                    "freecodecamp",
                    "freeCodeCamp",
                    "https://www.freecodecamp.org",
                    "Learn to code for free",
                    "fab fa-free-code-camp",
                    &["programming", "free", "learning", "certification"],
                ),
                site(
                    "juejin",
                    "Juejin",
                    "https://juejin.cn",
                    "Technical article community",
                    "fas fa-gem",
                    &["tech", "articles", "community", "front-end"],
                ),
                site(
                    "vue-mastery",
                    "Vue Mastery",
                    "https://www.vuemastery.com",
                    "Video courses for Vue.js",
                    "fab fa-vuejs",
                    &["Vue", "learning", "video", "tutorials"],
                ),
            ],
        ),
        category(
            "entertainment",
            "Entertainment",
            "fas fa-gamepad",
            "#667eea",
            vec![
                site(
                    "bilibili",
                    "Bilibili",
                    "https://www.bilibili.com",
                    "Video site with live comments",
                    "fas fa-tv",
                    &["video", "comments", "entertainment", "learning"],
                ),
                site(
                    "netease-music",
                    "NetEase Cloud Music",
                    "https://music.163.com",
                    "Music streaming and playlists",
                    "fas fa-music",
                    &["music", "player", "playlists"],
                ),
                site(
                    "reddit",
                    "Reddit",
                    "https://www.reddit.com",
                    "Social news aggregation and discussion",
                    "fab fa-reddit",
                    &["social", "news", "discussion"],
                ),
                site(
                    "unsplash",
                    "Unsplash",
                    "https://unsplash.com",
                    "Free high-resolution photos",
                    "fas fa-camera",
                    &["images", "photography", "free", "assets"],
                ),
                site(
                    "spotify",
                    "Spotify",
                    "https://open.spotify.com",
                    "Music streaming service",
                    "fab fa-spotify",
                    &["music", "streaming", "playlists"],
                ),
                site(
                    "pinterest",
                    "Pinterest",
                    "https://www.pinterest.com",
                    "Discover and share creative ideas",
                    "fab fa-pinterest",
                    &["images", "ideas", "inspiration", "design"],
                ),
            ],
        ),
    ]
}
