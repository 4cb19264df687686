//! Static catalog of maturity scales and recommendations.

use crate::{MaturityLevelDefinition, Priority, Recommendation};

/// Reference data for one dimension.
pub(super) struct ReferenceDimension {
    pub name: &'static str,
    pub levels: [MaturityLevelDefinition; 5],
    pub high: Recommendation,
    pub medium: Recommendation,
    pub low: Recommendation,
}

const fn level(
    level: i32,
    name: &'static str,
    description: &'static str,
) -> MaturityLevelDefinition {
    MaturityLevelDefinition {
        level,
        name,
        description,
    }
}

pub(super) static CATALOG: [ReferenceDimension; 3] = [
    ReferenceDimension {
        name: "Technology",
        levels: [
            level(
                1,
                "Legacy Systems",
                "The organization relies entirely on outdated, on-premise systems that are difficult to maintain and integrate.",
            ),
            level(
                2,
                "Basic Digital Tools",
                "Some digital tools (e.g., email, simple software) are in place, but processes remain largely manual.",
            ),
            level(
                3,
                "Partial Automation",
                "Some processes have been automated or digitized, but systems are not fully integrated.",
            ),
            level(
                4,
                "Cloud-Enabled",
                "The organization uses cloud-based systems for several core functions with good integration.",
            ),
            level(
                5,
                "Highly Scalable & Integrated",
                "The organization operates with modern, fully integrated, and scalable technology infrastructure.",
            ),
        ],
        high: Recommendation {
            actions: &[
                "Migrate to Cloud Infrastructure: Move systems to a secure, scalable cloud platform to improve accessibility and reduce maintenance costs.",
                "Integrate Systems Using Middleware/ESB: Connect disconnected systems to enable seamless data flow and reduce manual processes.",
                "Automate Manual Processes: Implement automation tools to streamline repetitive tasks and improve efficiency.",
            ],
            priority: Priority::Urgent,
        },
        medium: Recommendation {
            actions: &[
                "Upgrade Core Systems and Automation: Enhance partially automated systems to achieve greater efficiency and integration.",
                "Enhance System Integration: Strengthen system connectivity to improve data consistency and workflow automation.",
                "Optimize Digital Tools: Upgrade existing digital tools to support better collaboration and productivity.",
            ],
            priority: Priority::Important,
        },
        low: Recommendation {
            actions: &[
                "Adopt Advanced Analytics and AI Tools: Introduce AI-driven insights to optimize operations and decision-making.",
                "Improve System Scalability: Ensure that current systems can handle future growth and increased demand.",
                "Enhance Cybersecurity Measures: Strengthen security protocols to protect against evolving digital threats.",
            ],
            priority: Priority::FollowUp,
        },
    },
    ReferenceDimension {
        name: "Digital Culture",
        levels: [
            level(
                1,
                "Digital Resistance",
                "Employees largely resist digital tools and prefer traditional methods of working.",
            ),
            level(
                2,
                "Digital Experimentation",
                "Limited adoption of digital tools occurs within specific departments or teams.",
            ),
            level(
                3,
                "Digital Collaboration",
                "Employees are generally open to using digital tools for collaboration and communication.",
            ),
            level(
                4,
                "Adoption with Leadership Support",
                "Digital tools are widely used, and leadership encourages innovation and digital transformation.",
            ),
            level(
                5,
                "Fully Embedded Digital Culture",
                "Digital innovation is a core value, with high adoption across the organization and continuous improvement.",
            ),
        ],
        high: Recommendation {
            actions: &[
                "Implement Digital Literacy Training Programs: Educate employees on digital tools and their benefits to reduce resistance.",
                "Foster a Culture of Innovation: Encourage experimentation with new digital solutions and reward innovative thinking.",
                "Introduce Change Management Strategies: Guide the organization through digital transformation with clear communication and support.",
            ],
            priority: Priority::Urgent,
        },
        medium: Recommendation {
            actions: &[
                "Expand Digital Tool Usage: Broaden the adoption of digital tools across different departments and functions.",
                "Leadership Digital Champions: Establish digital champions at leadership level to drive cultural change.",
                "Regular Digital Culture Assessments: Monitor and measure digital culture progress through surveys and feedback.",
            ],
            priority: Priority::Important,
        },
        low: Recommendation {
            actions: &[
                "Continuous Innovation Programs: Establish ongoing programs for digital innovation and improvement.",
                "Digital Mentorship Networks: Create peer-to-peer learning networks to maintain digital culture momentum.",
                "Recognition and Rewards: Implement systems to recognize and reward digital innovation and adoption.",
            ],
            priority: Priority::FollowUp,
        },
    },
    ReferenceDimension {
        name: "Skills",
        levels: [
            level(
                1,
                "Insufficient Digital Skills",
                "Employees lack the necessary digital skills to effectively use modern tools and technologies.",
            ),
            level(
                2,
                "Basic Digital Skills",
                "Employees possess basic skills, such as using email and simple software applications.",
            ),
            level(
                3,
                "Moderate Skills, Limited to Certain Areas",
                "Some employees are proficient with specific digital tools relevant to their roles.",
            ),
            level(
                4,
                "Widespread Digital Proficiency",
                "Most employees are skilled in key digital areas and can adapt to new technologies.",
            ),
            level(
                5,
                "Advanced Expertise",
                "The workforce has strong digital skills across the board with ability to drive innovation.",
            ),
        ],
        high: Recommendation {
            actions: &[
                "Launch a Digital Skills Upskilling Program: Provide foundational and hands-on training for essential digital competencies.",
                "Establish a Mentorship and Peer-Learning System: Pair tech-savvy employees with those needing support to accelerate learning.",
                "Introduce Mandatory Digital Literacy Courses: Implement structured digital literacy programs for all employees.",
            ],
            priority: Priority::Urgent,
        },
        medium: Recommendation {
            actions: &[
                "Targeted Skills Development: Focus on specific digital skills gaps identified through assessments.",
                "Cross-functional Digital Training: Provide training that spans multiple departments and skill areas.",
                "External Training Partnerships: Partner with external providers for specialized digital skills training.",
            ],
            priority: Priority::Important,
        },
        low: Recommendation {
            actions: &[
                "Advanced Certification Programs: Offer advanced digital certifications for high-performing employees.",
                "Innovation Labs and Workshops: Create spaces for experimentation with cutting-edge digital technologies.",
                "Skills Assessment and Planning: Regular assessment of digital skills to maintain competitive advantage.",
            ],
            priority: Priority::FollowUp,
        },
    },
];
