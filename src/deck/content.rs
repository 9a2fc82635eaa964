//! Text of the Attendance App project deck.

/// A title with top-level bullet lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletSlide {
    pub title: &'static str,
    pub bullets: &'static [&'static str],
}

/// A title, intro bullets and one trailing hyperlinked line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSlide {
    pub title: &'static str,
    pub intro: &'static [&'static str],
    pub link_text: &'static str,
    pub link_url: &'static str,
}

pub const DECK_TITLE: &str = "Attendance App";

pub const BULLET_SLIDES: [BulletSlide; 8] = [
    BulletSlide {
        title: "Attendance App",
        bullets: &[
            "Role-based, period-wise attendance with reports",
            "Tech Stack: React + Vite, TailwindCSS, Supabase (Auth, Postgres), jsPDF",
            "Roles: Admin, Staff",
            "Deployment: SPA-ready (Netlify/Vercel)",
        ],
    },
    BulletSlide {
        title: "Abstract",
        bullets: &[
            "Problem: manual attendance is slow, error-prone, and fragmented",
            "Solution: cloud-backed web app with secure auth and RBAC",
            "Features: period-wise student + staff tracking, PDF exports",
            "Outcome: faster marking, centralized records, audit-ready reports",
        ],
    },
    BulletSlide {
        title: "Introduction",
        bullets: &[
            "Motivation: reduce errors and improve visibility across departments",
            "Objectives: auth + RBAC, interactive timetable, reporting",
            "Scope: React SPA with Supabase; focuses on period tracking",
        ],
    },
    BulletSlide {
        title: "Literature Survey",
        bullets: &[
            "Manual registers: low-cost; poor aggregation and analytics",
            "Biometric/RFID: accurate; higher cost and maintenance",
            "QR-based: fast; device coordination challenges",
            "Cloud web systems: centralized, scalable; needs solid auth/data design",
            "Gap solved: RBAC, period granularity, bulk ops, integrated reports",
        ],
    },
    BulletSlide {
        title: "Proposed Work",
        bullets: &[
            "Architecture: React SPA → Supabase → Postgres tables",
            "Auth & RBAC: session + ProtectedRoute with role checks",
            "Period-wise attendance: mark, counts, alt staff, per-student statuses",
            "Bulk imports and PDF reporting",
        ],
    },
    BulletSlide {
        title: "Flowcharts & Algorithm",
        bullets: &[
            "Auth flow: sign up/in → session → role-based routing",
            "Marking flow: timetable → select period → upsert records",
            "Data write: period_attendance + period_student_attendance",
            "Export flow: generate Period-wise PDF",
        ],
    },
    BulletSlide {
        title: "Future Work",
        bullets: &[
            "Offline-first PWA and sync queue",
            "Mobile app (Android/iOS)",
            "Face recognition integration",
            "Notifications/approvals and analytics dashboards",
        ],
    },
    BulletSlide {
        title: "Results & Conclusions",
        bullets: &[
            "Achieved: secure RBAC, interactive timetable, period-wise marking",
            "Reports: color-coded PDFs for audits",
            "Impact: faster cycles and centralized data",
            "Conclusion: practical, scalable attendance management",
        ],
    },
];

pub const DEMO_SLIDE: LinkSlide = LinkSlide {
    title: "Project Demo",
    intro: &[
        "Admin: mark period-wise attendance and download reports",
        "Staff: mark own attendance and class-wise summaries",
    ],
    link_text: "Open Demo: mini-project-salabadee.vercel.app",
    link_url: "https://mini-project-salabadee.vercel.app/",
};
