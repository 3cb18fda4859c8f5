// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! End-to-end scenarios driven through the public API only: string
//! sources in, Swift text and diagnostics out.

use objswift_core::ast::{ObjcType, TopLevel, TypeSpecifier, find_keyword};
use objswift_core::input::StringInputSource;
use objswift_core::output::MemoryWriterOutput;
use objswift_core::rewriter::Rewriter;
use objswift_core::source_analysis::{AtKeyword, parse_source};

fn rewrite(files: &[(&str, &str)]) -> (MemoryWriterOutput, objswift_core::prelude::Diagnostics) {
    let provider = StringInputSource::provider(
        files
            .iter()
            .map(|(name, source)| StringInputSource::new(*name, *source))
            .collect(),
    );
    let output = MemoryWriterOutput::new();
    let diagnostics = Rewriter::new(provider, output.clone())
        .rewrite()
        .expect("no fatal error");
    (output, diagnostics)
}

#[test]
fn forward_declaration_only() {
    let (output, diagnostics) = rewrite(&[("objc.h", "@class MyClass;")]);
    assert_eq!(diagnostics.error_count(), 0);
    assert!(output.files().is_empty(), "no class intention expected");
}

#[test]
fn empty_interface() {
    let (context, diagnostics) = parse_source("@interface MyClass\n@end").unwrap();
    assert_eq!(diagnostics.error_count(), 0);

    let TopLevel::ClassInterface(interface) = &context.members[0] else {
        panic!("expected a class interface");
    };
    assert_eq!(interface.identifier.name, "MyClass");
    assert!(interface.ivars.is_none());
    assert!(find_keyword(&interface.keywords, AtKeyword::Interface).is_some());
    assert!(find_keyword(&interface.keywords, AtKeyword::End).is_some());
}

#[test]
fn ivars_with_ownership() {
    let source = "@interface C {\n    NSString *_myString;\n    __weak id _delegate;\n}\n@end";
    let (context, diagnostics) = parse_source(source).unwrap();
    assert_eq!(diagnostics.error_count(), 0);

    let TopLevel::ClassInterface(interface) = &context.members[0] else {
        panic!("expected a class interface");
    };
    let ivars = interface.ivars.as_ref().expect("ivar block");

    assert_eq!(
        ivars.ivars[0].ty,
        ObjcType::Pointer(Box::new(ObjcType::Struct("NSString".into())))
    );
    assert_eq!(
        ivars.ivars[1].ty,
        ObjcType::Specified {
            specifiers: vec![TypeSpecifier::Weak],
            base: Box::new(ObjcType::Id { protocols: vec![] }),
        }
    );
}

#[test]
fn synthesize_and_dynamic() {
    let source = "@implementation C\n@synthesize abc;\n@dynamic def, ghi=jlm;\n@end";
    let (context, diagnostics) = parse_source(source).unwrap();
    assert_eq!(diagnostics.error_count(), 0);

    let TopLevel::ClassImplementation(implementation) = &context.members[0] else {
        panic!("expected a class implementation");
    };
    let impls = &implementation.property_impls;
    assert_eq!(impls.len(), 2);

    assert_eq!(impls[0].items.len(), 1);
    assert_eq!(impls[0].items[0].name.name, "abc");
    assert!(impls[0].items[0].ivar.is_none());

    assert_eq!(impls[1].items.len(), 2);
    assert_eq!(impls[1].items[0].name.name, "def");
    assert!(impls[1].items[0].ivar.is_none());
    assert_eq!(impls[1].items[1].name.name, "ghi");
    assert_eq!(
        impls[1].items[1].ivar.as_ref().map(|i| i.name.as_str()),
        Some("jlm")
    );
}

#[test]
fn protocol_list_recovery() {
    let source = "@interface MyClass : Superclass <MyProtocol1, >\n@end";
    let (context, diagnostics) = parse_source(source).unwrap();
    assert!(diagnostics.error_count() > 0);

    let TopLevel::ClassInterface(interface) = &context.members[0] else {
        panic!("expected a class interface");
    };
    let protocols = interface.protocols.as_ref().expect("protocol list");
    assert_eq!(protocols.protocols.len(), 1);
    assert_eq!(protocols.protocols[0].name, "MyProtocol1");
    assert!(protocols.open_angle.is_some());
    assert!(protocols.close_angle.is_some());
}

#[test]
fn interface_only_produces_swift() {
    let (output, diagnostics) = rewrite(&[(
        "objc.h",
        "@interface MyClass\n- (void)myMethod;\n@end",
    )]);
    assert_eq!(diagnostics.error_count(), 0);
    assert_eq!(
        output.file("objc.h").as_deref(),
        Some("class MyClass: NSObject {\n    func myMethod() {\n    }\n}\n// End of file objc.h")
    );
}

#[test]
fn header_and_implementation_collapse_to_one_swift_file() {
    let (output, diagnostics) = rewrite(&[
        ("objc.h", "@interface MyClass\n- (void)myMethod;\n@end"),
        (
            "objc.m",
            "@implementation MyClass\n- (void)myMethod {\n}\n@end",
        ),
    ]);
    assert_eq!(diagnostics.error_count(), 0);

    let files = output.files();
    assert_eq!(files.len(), 1, "header must not be re-emitted");
    let text = output.file("objc.m").expect("merged output");
    assert!(text.ends_with("// End of file objc.m"));
    assert!(text.contains("class MyClass: NSObject"));
    assert!(text.contains("func myMethod()"));
}

#[test]
fn span_containment_holds_for_parsed_nodes() {
    let source = "@interface A : B <P>\n{\n    int _x;\n}\n@property (nonatomic) int y;\n- (void)m;\n@end";
    let (context, diagnostics) = parse_source(source).unwrap();
    assert_eq!(diagnostics.error_count(), 0);

    let TopLevel::ClassInterface(interface) = &context.members[0] else {
        panic!("expected a class interface");
    };
    assert!(context.span.contains(interface.span));

    if let Some(protocols) = &interface.protocols {
        assert!(interface.span.contains(protocols.span));
        for protocol in &protocols.protocols {
            assert!(protocols.span.contains(protocol.span));
        }
    }
    if let Some(ivars) = &interface.ivars {
        assert!(interface.span.contains(ivars.span));
        for ivar in &ivars.ivars {
            assert!(ivars.span.contains(ivar.span));
        }
    }
    for property in &interface.properties {
        assert!(interface.span.contains(property.span));
    }
    for method in &interface.methods {
        assert!(interface.span.contains(method.span));
    }
    for keyword in &interface.keywords {
        assert!(interface.span.contains(keyword.span));
    }
}
