use super::*;
use nalgebra::DMatrix;

fn pca_fixture() -> PcaResult {
    PcaResult {
        components: vec![vec![0.8, 0.6], vec![-0.6, 0.8]],
        eigenvalues: vec![1.5, 0.5],
        explained_variance_ratio: vec![0.75, 0.25],
        scores: DMatrix::zeros(3, 2),
    }
}

#[test]
fn test_eigen_summary_order() {
    let lines = render_eigen_summary(&pca_fixture(), &["x".to_string(), "y".to_string()]);
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("Eigenvectors"));
    assert!(lines[0].contains("[x, y]"));
    assert_eq!(lines[1], "  PC1: [0.800000, 0.600000]");
    assert_eq!(lines[2], "  PC2: [-0.600000, 0.800000]");
    assert!(lines[3].starts_with("Eigenvalues"));
    assert!(lines[4].ends_with("[0.750000, 0.250000]"));
    assert!(lines[5].starts_with("Cumulative"));
    assert!(lines[5].ends_with("[0.750000, 1.000000]"));
}

#[test]
fn test_top_table() {
    let ranking = vec![
        RankedStudent {
            rank: 1,
            student: "Maximiliano".to_string(),
            group: "A".to_string(),
            score: 2.5,
        },
        RankedStudent {
            rank: 2,
            student: "Ana".to_string(),
            group: "B".to_string(),
            score: -0.25,
        },
    ];
    let lines = render_top_table(&ranking);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Top 2 students by first principal component:");
    assert!(lines[1].contains("alumno"));
    assert!(lines[2].contains("Maximiliano"));
    assert!(lines[2].ends_with("2.500000"));
    assert!(lines[3].contains("Ana"));
    assert!(lines[3].ends_with("-0.250000"));
    assert_eq!(lines[2].len(), lines[3].len());
}
