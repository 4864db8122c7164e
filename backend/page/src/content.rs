//! # Content
//!
//! Static tables behind the interactive parts of the page.
//!
//! - Homelab cards carry a `data-node` id looked up in [`HOMELAB_NODES`]
//! - Blog cards carry a `data-post` id looked up in [`BLOG_POSTS`]
//! - Diagram regions are typed out from [`DIAGRAMS`] as they scroll into view

pub struct HomelabNode {
    pub id: &'static str,
    pub title: &'static str,
    pub purpose: &'static str,
    pub services: &'static [&'static str],
}

pub struct BlogPost {
    pub id: &'static str,
    pub title: &'static str,
    pub badge: &'static str,
    /// ISO `YYYY-MM-DD`.
    pub date: &'static str,
    pub tags: &'static [&'static str],
    /// Trusted HTML body.
    pub content: &'static str,
    pub github: &'static str,
    /// `"#"` when there is no documentation page.
    pub docs: &'static str,
}

pub struct Diagram {
    pub region: &'static str,
    pub text: &'static str,
}

pub fn homelab_node(id: &str) -> Option<&'static HomelabNode> {
    HOMELAB_NODES.iter().find(|node| node.id == id)
}

pub fn blog_post(id: &str) -> Option<&'static BlogPost> {
    BLOG_POSTS.iter().find(|post| post.id == id)
}

pub static HOMELAB_NODES: &[HomelabNode] = &[
    HomelabNode {
        id: "phoenix-current",
        title: "Phoenix",
        purpose: "Main orchestration & service host",
        services: &[
            "AdGuard DNS - Network-wide ad blocking",
            "Tailscale subnet router - Secure remote access",
            "Portainer Server - Container management",
            "Homarr + Watchtower - Dashboard and auto-updates",
            "Nginx Proxy (public + private) - Reverse proxy",
            "Vaultwarden - Password manager",
            "Grafana + Uptime Kuma - Monitoring and alerts",
            "Web hosting + Cloudflare tunnel - Public services",
            "TrueNAS VM - Storage management",
        ],
    },
    HomelabNode {
        id: "atlas-current",
        title: "Atlas",
        purpose: "Storage backend + cloud",
        services: &[
            "TrueNAS (NFS/SMB) - Network storage",
            "PostgreSQL - Database server",
            "Nextcloud - Personal cloud storage",
        ],
    },
    HomelabNode {
        id: "helios-current",
        title: "Helios",
        purpose: "Testing & game servers",
        services: &[
            "Lightweight workloads - Testing environment",
            "Sandbox - Experimentation space",
            "Game server experiments - Multiplayer hosting",
        ],
    },
    HomelabNode {
        id: "pi-fleet-current",
        title: "Raspberry Pi Fleet",
        purpose: "Monitoring & redundancy",
        services: &[
            "Independent uptime monitor (planned)",
            "DNS backup (planned)",
            "Network telemetry (not yet implemented)",
        ],
    },
    HomelabNode {
        id: "phoenix-future",
        title: "Phoenix 2.0",
        purpose: "Orchestration node",
        services: &[
            "Homarr - Unified dashboard",
            "Portainer - Container orchestration",
            "Watchtower - Automated updates",
            "Nginx Proxy Manager - Advanced reverse proxy",
            "Vaultwarden (Tailscale) - Secure password vault",
            "Beszel monitoring - System metrics",
            "Uptime Kuma - Status monitoring",
            "Tailscale Subnet Router + CF Tunnel - Hybrid access",
        ],
    },
    HomelabNode {
        id: "helios-future",
        title: "Helios 2.0",
        purpose: "Lightweight node",
        services: &[
            "Game servers - Minecraft, Valheim, etc.",
            "Testing VMs - Development environment",
            "Workload balancing with Phoenix - Distributed computing",
        ],
    },
    HomelabNode {
        id: "artemis-future",
        title: "Artemis (New Node)",
        purpose: "High-performance node",
        services: &[
            "Ollama (AI/LLM) - Local AI models",
            "Jellyfin media server - Personal Netflix",
            "Immich / AI utilities - Photo management with AI",
            "GPU/CUDA/TensorRT tasks - Machine learning workloads",
        ],
    },
    HomelabNode {
        id: "atlas-future",
        title: "Atlas 2.0",
        purpose: "NAS + Cloud storage",
        services: &[
            "TrueNAS (NFS + SMB) - Network storage",
            "Nextcloud (primary cloud) - Personal cloud platform",
            "PostgreSQL (shared DB) - Centralized database",
            "Backups/Snapshots - Data protection",
            "ECC RAM + Storage expansion - Reliability and capacity",
        ],
    },
    HomelabNode {
        id: "pi-fleet-future",
        title: "Raspberry Pi Fleet",
        purpose: "External monitoring & redundancy",
        services: &[
            "Pi-Monitor - Uptime tracking with Discord alerts",
            "Pi-Redundancy - DNS/AdGuard backup",
            "Pi-Telemetry - Network probes, SNMP, Prometheus",
            "Pi-AI-Edge - Lightweight AI experiments",
        ],
    },
];

pub static BLOG_POSTS: &[BlogPost] = &[
    BlogPost {
        id: "docker-homelab",
        title: "Docker Homelab Setup",
        badge: "Guide",
        date: "2025-01-15",
        tags: &["Docker", "Linux", "Homelab"],
        content: r#"
      <h4>Introduction</h4>
      <p>This comprehensive guide walks you through setting up Docker containers in your homelab environment. From initial installation to advanced container orchestration, you'll learn everything needed to run production-ready services.</p>

      <h4>Key Topics Covered</h4>
      <ul>
        <li>Installing Docker and Docker Compose</li>
        <li>Container networking fundamentals</li>
        <li>Volume management and persistent storage</li>
        <li>Docker Compose best practices</li>
        <li>Security hardening for homelab containers</li>
        <li>Monitoring and logging strategies</li>
      </ul>

      <h4>Prerequisites</h4>
      <ul>
        <li>Basic Linux command line knowledge</li>
        <li>A server or VM with a supported Linux distribution</li>
        <li>Root or sudo access</li>
      </ul>
    "#,
        github: "https://github.com/josechezuria",
        docs: "#",
    },
    BlogPost {
        id: "proxmox-setup",
        title: "Proxmox VE Guide",
        badge: "Tutorial",
        date: "2025-01-10",
        tags: &["Proxmox", "Virtualization", "Self-Hosted"],
        content: r#"
      <h4>Introduction</h4>
      <p>Learn how to configure and optimize Proxmox Virtual Environment for home use. This tutorial covers installation, configuration, and best practices for running a stable homelab virtualization platform.</p>

      <h4>What You'll Learn</h4>
      <ul>
        <li>Proxmox VE installation and initial setup</li>
        <li>Storage configuration (local, NFS, ZFS)</li>
        <li>VM and LXC container creation</li>
        <li>Networking setup (bridges, VLANs)</li>
        <li>Backup and restore strategies</li>
        <li>High availability clustering basics</li>
      </ul>

      <h4>Hardware Requirements</h4>
      <ul>
        <li>64-bit CPU with virtualization support (Intel VT-x/AMD-V)</li>
        <li>Minimum 4GB RAM (8GB+ recommended)</li>
        <li>At least 32GB storage for the OS</li>
      </ul>
    "#,
        github: "https://github.com/josechezuria",
        docs: "#",
    },
    BlogPost {
        id: "nginx-reverse-proxy",
        title: "NGINX Reverse Proxy",
        badge: "Documentation",
        date: "2025-01-05",
        tags: &["NGINX", "Security", "DevOps"],
        content: r#"
      <h4>Introduction</h4>
      <p>Setting up NGINX as a reverse proxy with SSL certificates is essential for securely exposing your homelab services. This guide covers everything from basic configuration to advanced SSL/TLS setup.</p>

      <h4>Topics Covered</h4>
      <ul>
        <li>Installing and configuring NGINX</li>
        <li>Reverse proxy fundamentals</li>
        <li>SSL/TLS certificate setup with Let's Encrypt</li>
        <li>Security headers and best practices</li>
        <li>WebSocket proxy configuration</li>
        <li>Load balancing basics</li>
      </ul>

      <h4>Example Use Cases</h4>
      <ul>
        <li>Exposing Docker containers with custom domains</li>
        <li>Hosting multiple web applications on one IP</li>
        <li>Adding SSL to services that don't support it natively</li>
        <li>Setting up authentication for internal services</li>
      </ul>
    "#,
        github: "https://github.com/josechezuria",
        docs: "#",
    },
];

pub static DIAGRAMS: &[Diagram] = &[
    Diagram {
        region: "diagram-current",
        text: r"
            [ Internet ]
                 |
        [ Cloudflare Tunnel ]
                 |
   +-------------+-------------+
   |        PHOENIX (host)     |
   |  AdGuard   Tailscale      |
   |  Portainer Nginx Proxy    |
   |  Grafana   Uptime Kuma    |
   +------+-------------+------+
          |             |
   [ ATLAS (NAS) ] [ HELIOS (lab) ]
          |
   [ Pi Fleet (monitoring) ]
",
    },
    Diagram {
        region: "diagram-future",
        text: r"
            [ Internet ]
                 |
   [ Cloudflare Tunnel + Tailscale ]
                 |
   +-------------+-------------+
   |      PHOENIX 2.0 (orch)   |
   |  Homarr  Portainer  NPM   |
   |  Beszel  Uptime Kuma      |
   +---+---------+---------+---+
       |         |         |
 [ HELIOS 2.0 ] [ ARTEMIS ] [ ATLAS 2.0 ]
   games/VMs    GPU / AI    NAS + cloud
                 |
   [ Pi Fleet: monitor / DNS / telemetry ]
",
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ids_are_unique() {
        let nodes: HashSet<_> = HOMELAB_NODES.iter().map(|node| node.id).collect();
        let posts: HashSet<_> = BLOG_POSTS.iter().map(|post| post.id).collect();
        let diagrams: HashSet<_> = DIAGRAMS.iter().map(|diagram| diagram.region).collect();

        assert_eq!(nodes.len(), HOMELAB_NODES.len());
        assert_eq!(posts.len(), BLOG_POSTS.len());
        assert_eq!(diagrams.len(), DIAGRAMS.len());
    }

    #[test]
    fn lookups_find_known_ids_only() {
        assert_eq!(homelab_node("artemis-future").map(|n| n.title), Some("Artemis (New Node)"));
        assert_eq!(blog_post("proxmox-setup").map(|p| p.badge), Some("Tutorial"));
        assert!(homelab_node("nope").is_none());
        assert!(blog_post("").is_none());
    }
}
