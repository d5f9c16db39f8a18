use crate::{Position, Profile, ProjectRecord};

fn demo(id: &str, title: &str, description: &str, tags: &[&str], x: f64, y: f64) -> ProjectRecord {
    ProjectRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        live_link: Some("https://example.com".to_string()),
        github_link: Some("https://github.com".to_string()),
        skills_used: None,
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        position: Some(Position::new(x, y)),
        created_at: None,
    }
}

/// The five showcase projects rendered when no store is configured.
pub fn demo_projects() -> Vec<ProjectRecord> {
    vec![
        demo(
            "1",
            "E-Commerce Platform",
            "Full-stack e-commerce solution",
            &["React", "Node.js", "MongoDB", "Stripe", "Redis"],
            50.0,
            30.0,
        ),
        demo(
            "2",
            "Task Manager Pro",
            "Collaborative task management app",
            &["Vue.js", "Firebase", "Tailwind", "WebSocket"],
            75.0,
            45.0,
        ),
        demo(
            "3",
            "Weather Dashboard",
            "Real-time weather tracking",
            &["Svelte", "TypeScript", "API", "D3.js"],
            70.0,
            70.0,
        ),
        demo(
            "4",
            "Portfolio Galaxy",
            "Interactive portfolio website",
            &["SvelteKit", "Supabase", "Three.js"],
            30.0,
            70.0,
        ),
        demo(
            "5",
            "AI Chat Bot",
            "Intelligent conversational AI",
            &["Python", "TensorFlow", "NLP", "FastAPI"],
            25.0,
            45.0,
        ),
    ]
}

/// Profile shown alongside the demo projects.
pub fn demo_profile() -> Profile {
    Profile {
        about_text: "Welcome to my cosmic portfolio! I'm a passionate developer creating \
                     amazing experiences with modern web technologies."
            .to_string(),
        ..Profile::default()
    }
}
