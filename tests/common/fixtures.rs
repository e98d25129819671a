//! Static run-report documents used across harnesses.
//!
//! `GINKGO_REPORT` is shaped like the output of `ginkgo --json-report`: a
//! JSON array holding one report, PascalCase keys, durations as integer
//! nanoseconds and `null` for empty Go slices.

use std::path::{Path, PathBuf};

/// One suite with a `BeforeSuite` node, two build specs (one failed, with a
/// progress report) and a skipped release spec.
pub const GINKGO_REPORT: &str = r#"[
  {
    "SuitePath": "/go/src/e2e-tests/cmd",
    "SuiteDescription": "Red Hat App Studio E2E tests",
    "SuiteLabels": ["e2e"],
    "SuiteSucceeded": false,
    "SuiteHasProgrammaticFocus": false,
    "SpecialSuiteFailureReasons": null,
    "PreRunStats": { "TotalSpecs": 3, "SpecsThatWillRun": 3 },
    "StartTime": "2024-01-15T10:00:00.5Z",
    "EndTime": "2024-01-15T10:05:00Z",
    "RunTime": 299500000000,
    "SuiteConfig": {
      "RandomSeed": 1705312800,
      "RandomizeAllSpecs": false,
      "FocusStrings": null,
      "SkipStrings": null,
      "FocusFiles": null,
      "SkipFiles": null,
      "LabelFilter": "build,release",
      "FailOnPending": false,
      "FailFast": false,
      "FlakeAttempts": 0,
      "EmitSpecProgress": false,
      "DryRun": false,
      "PollProgressAfter": 0,
      "ParallelProcess": 1,
      "ParallelTotal": 1,
      "OutputInterceptorMode": ""
    },
    "SpecReports": [
      {
        "ContainerHierarchyTexts": null,
        "ContainerHierarchyLocations": null,
        "ContainerHierarchyLabels": null,
        "LeafNodeType": "BeforeSuite",
        "LeafNodeLocation": { "FileName": "/go/src/e2e-tests/cmd/e2e_test.go", "LineNumber": 30 },
        "LeafNodeText": "",
        "LeafNodeLabels": null,
        "State": "passed",
        "StartTime": "2024-01-15T10:00:00.5Z",
        "EndTime": "2024-01-15T10:00:01Z",
        "RunTime": 500000000,
        "ParallelProcess": 1,
        "NumAttempts": 1,
        "MaxFlakeAttempts": 0
      },
      {
        "ContainerHierarchyTexts": ["[build-service-suite Build] [test_id:01] [crit:high]", "when a component is created"],
        "ContainerHierarchyLocations": [
          { "FileName": "/go/src/e2e-tests/tests/build/build.go", "LineNumber": 20 },
          { "FileName": "/go/src/e2e-tests/tests/build/build.go", "LineNumber": 40 }
        ],
        "ContainerHierarchyLabels": [["build-service", "HACBS"], null],
        "LeafNodeType": "It",
        "LeafNodeLocation": { "FileName": "/go/src/e2e-tests/tests/build/build.go", "LineNumber": 60 },
        "LeafNodeText": "triggers a PipelineRun",
        "LeafNodeLabels": null,
        "State": "passed",
        "StartTime": "2024-01-15T10:00:01Z",
        "EndTime": "2024-01-15T10:01:01Z",
        "RunTime": 60000000000,
        "ParallelProcess": 1,
        "NumAttempts": 1,
        "CapturedStdOutErr": "component created\n",
        "ReportEntries": [
          {
            "Name": "pipelinerun",
            "Location": { "FileName": "/go/src/e2e-tests/tests/build/build.go", "LineNumber": 70 },
            "Time": "2024-01-15T10:01:00.25Z",
            "Value": { "Representation": "build-pr-abc12", "AsJSON": "\"build-pr-abc12\"" }
          }
        ]
      },
      {
        "ContainerHierarchyTexts": ["[build-service-suite Build] [test_id:01] [crit:high]", "when a component is created"],
        "ContainerHierarchyLocations": [
          { "FileName": "/go/src/e2e-tests/tests/build/build.go", "LineNumber": 20 },
          { "FileName": "/go/src/e2e-tests/tests/build/build.go", "LineNumber": 40 }
        ],
        "ContainerHierarchyLabels": [["build-service", "HACBS"], null],
        "LeafNodeType": "It",
        "LeafNodeLocation": { "FileName": "/go/src/e2e-tests/tests/build/build.go", "LineNumber": 80 },
        "LeafNodeText": "pushes the image",
        "LeafNodeLabels": null,
        "State": "failed",
        "StartTime": "2024-01-15T10:01:01Z",
        "EndTime": "2024-01-15T10:03:01Z",
        "RunTime": 120000000000,
        "ParallelProcess": 1,
        "NumAttempts": 1,
        "CapturedGinkgoWriterOutput": "waiting for pipelinerun\nstill waiting\n",
        "CapturedStdOutErr": "",
        "Failure": {
          "Message": "Timed out after 120s.\nExpected <bool>: false to be true",
          "Location": {
            "FileName": "/go/src/e2e-tests/tests/build/build.go",
            "LineNumber": 95,
            "FullStackTrace": "github.com/redhat-appstudio/e2e-tests/tests/build.glob..func1.2()\n\t/go/src/e2e-tests/tests/build/build.go:95 +0x1a5"
          },
          "ForwardedPanic": "",
          "FailureNodeContext": 0,
          "FailureNodeType": "It",
          "FailureNodeLocation": { "FileName": "/go/src/e2e-tests/tests/build/build.go", "LineNumber": 80 },
          "FailureNodeContainerIndex": 0,
          "ProgressReport": {}
        },
        "ProgressReports": [
          {
            "Message": "Spec Progress",
            "ContainerHierarchyTexts": null,
            "LeafNodeText": "",
            "TimelineLocation": { "Offset": 24, "Order": 1, "Time": "2024-01-15T10:02:00Z" }
          }
        ]
      },
      {
        "ContainerHierarchyTexts": ["[release-service-suite Release] [rfe_id:55]"],
        "ContainerHierarchyLocations": [
          { "FileName": "/go/src/e2e-tests/tests/release/release.go", "LineNumber": 12 }
        ],
        "ContainerHierarchyLabels": [["release-service"]],
        "LeafNodeType": "It",
        "LeafNodeLocation": { "FileName": "/go/src/e2e-tests/tests/release/release.go", "LineNumber": 30 },
        "LeafNodeText": "releases the snapshot",
        "LeafNodeLabels": ["slow"],
        "State": "skipped",
        "StartTime": "0001-01-01T00:00:00Z",
        "EndTime": "0001-01-01T00:00:00Z",
        "RunTime": 0,
        "ParallelProcess": 1,
        "NumAttempts": 0
      }
    ]
  }
]"#;

/// Write `json` to `<dir>/report.json` and return the path.
pub fn write_report(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("report.json");
    std::fs::write(&path, json).unwrap_or_else(|e| panic!("writing {}: {e}", path.display()));
    path
}

/// Pod log with mixed formats around a 10:00:03Z cutoff.
pub const POD_LOG: &str = "\
2024-01-15T10:00:01Z INFO controller starting
{\"level\":\"info\",\"ts\":\"2024-01-15T10:00:02Z\",\"msg\":\"reconciling\"}
plain line without a timestamp
2024-01-15T10:00:99Z broken clock
I0115 10:00:03.000000 1 main.go:10] time=2024-01-15T10:00:03Z leader elected
2024-01-15T10:00:02Z late line from another writer
trailing plain line";
