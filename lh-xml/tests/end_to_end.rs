//! Whole-unit serialization tests

use lh_common::{LighthouseError, SourceLanguage, SourceLocation};
use lh_ir::{
    CallExpr, EdgeFlags, Expression, Operator, Statement, TranslationUnit, TypeNode, UnitBuilder,
};
use lh_xml::writer::is_xml_char;
use lh_xml::{deliver, serialize_unit, MemorySink};
use pretty_assertions::assert_eq;

fn int() -> TypeNode {
    TypeNode::integer(32, false)
}

fn serialize(unit: &TranslationUnit, source: &[u8]) -> String {
    let doc = serialize_unit(unit, source, "0.1.0").unwrap();
    String::from_utf8(doc).unwrap()
}

/// Check that `doc` only holds characters XML 1.0 allows, that every
/// character reference names one, and that elements nest under one root
fn assert_well_formed(doc: &str) {
    for ch in doc.chars() {
        assert!(is_xml_char(ch), "raw character {:#x}", u32::from(ch));
    }
    for reference in doc.split("&#").skip(1) {
        let value: u32 = reference.split(';').next().unwrap().parse().unwrap();
        assert!(char::from_u32(value).is_some_and(is_xml_char), "reference &#{value};");
    }

    let mut open: Vec<&str> = Vec::new();
    let mut roots = 0;
    for tag in doc.split('<').skip(1) {
        let tag = &tag[..tag.find('>').unwrap()];
        if tag.starts_with('?') {
            continue;
        }
        if let Some(name) = tag.strip_prefix('/') {
            assert_eq!(open.pop(), Some(name));
        } else if !tag.ends_with('/') {
            if open.is_empty() {
                roots += 1;
            }
            open.push(tag.split(' ').next().unwrap());
        }
    }
    assert!(open.is_empty());
    assert_eq!(roots, 1);
}

/// The part of `doc` from `start` up to the first `end` after it
fn section<'a>(doc: &'a str, start: &str, end: &str) -> &'a str {
    let from = doc.find(start).unwrap();
    let len = doc[from..].find(end).unwrap() + end.len();
    &doc[from..from + len]
}

#[test]
fn test_single_return_document() {
    let mut b = UnitBuilder::new("hello.c", SourceLanguage::C);
    let main = b.function_decl("main", TypeNode::function(int(), vec![TypeNode::void()]));
    let mut f = b.function(main);
    f.located(SourceLocation::new("hello.c", 1, 5)).span(1, 1);
    let result = f.result(int());
    f.create_block(2);
    f.push(Statement::ret(Some(Expression::result(result))).at(SourceLocation::new("hello.c", 1, 18)))
        .unwrap();
    f.edge(1, EdgeFlags::empty()).unwrap();
    f.finish();
    let unit = b.finish();

    let doc = serialize(&unit, b"int main(void) { return 0; }\n");
    assert_eq!(
        doc,
        "<?xml version='1.0' encoding='UTF-8'?>

<lh-translation-unit filename='hello.c' language='C' client-version='0.1.0'>
  <raw-source>int main(void) { return 0; }
</raw-source>
  <referenced-types>
  </referenced-types>
  <function-bodies>
    <function name='main' location='hello.c:1' body-begin='1' body-end='1'>
      <returns>
        <integer precision='32' />
      </returns>
      <args>
      </args>
      <body entrypoint='2'>
        <locals>
        </locals>
        <block id='2'>
          <return location='hello.c:1:18'>
            <result id='2' />
          </return>
        </block>
      </body>
      <externals>
      </externals>
    </function>
  </function-bodies>
</lh-translation-unit>
"
    );
}

/// `struct node { int x; struct node *next; }`, a global `counter`, and
/// two functions that both use them
fn linked_list_unit() -> TranslationUnit {
    let mut b = UnitBuilder::new("list.c", SourceLanguage::C);
    let node = b.new_type_uid();
    b.define_structure(
        node,
        Some("node"),
        vec![("x", int()), ("next", TypeNode::pointer_to(TypeNode::aggregate(node)))],
    );
    let node_ptr = TypeNode::pointer_to(TypeNode::aggregate(node));
    let counter = b.global("counter", int(), false);

    let sum = b.function_decl("sum", TypeNode::function(int(), vec![node_ptr.clone(), TypeNode::void()]));
    let mut f = b.function(sum);
    let n = f.param("n", node_ptr.clone());
    let total = f.local(Some("total"), int());
    let result = f.result(int());
    f.create_block(2);
    f.push(Statement::copy(Expression::var(total), Expression::var(counter))).unwrap();
    f.push(Statement::assign_binary(
        Expression::var(counter),
        Operator::Plus,
        Expression::var(counter),
        Expression::int(int(), 1),
    ))
    .unwrap();
    f.push(Statement::copy(
        Expression::result(result),
        Expression::member(Expression::deref(Expression::param(n)), 1),
    ))
    .unwrap();
    f.push(Statement::ret(Some(Expression::result(result)))).unwrap();
    f.edge(1, EdgeFlags::empty()).unwrap();
    f.finish();

    let reset = b.function_decl("reset", TypeNode::function(TypeNode::void(), vec![TypeNode::void()]));
    let mut f = b.function(reset);
    let head = f.local(Some("head"), node_ptr);
    f.create_block(2);
    f.push(Statement::copy(Expression::var(counter), Expression::int(int(), 0))).unwrap();
    f.push(Statement::call(CallExpr::direct(sum, vec![Expression::var(head)], None))).unwrap();
    f.push(Statement::ret(None)).unwrap();
    f.edge(1, EdgeFlags::empty()).unwrap();
    f.finish();

    b.finish()
}

#[test]
fn test_self_referential_structure_defined_once() {
    let doc = serialize(&linked_list_unit(), b"");

    assert_eq!(doc.matches("<structure id='1' name='node'>").count(), 1);
    let definition = section(&doc, "<structure id='1' name='node'>", "</structure>");
    assert!(definition.contains("<binding id='1' name='x' />"));
    assert!(definition.contains("<addr-of>\n            <structure id='1' />\n"));

    // Every other mention is a bare reference
    let references = doc.matches("<structure id='1' />").count();
    assert!(references >= 3);
}

#[test]
fn test_externals_per_function() {
    let doc = serialize(&linked_list_unit(), b"");
    let counter = "<binding id='3' name='counter' scope='global' />";

    let sum = section(&doc, "<function name='sum'", "</function>\n    <function");
    let externals = section(sum, "<externals>", "</externals>");
    assert_eq!(externals.matches(counter).count(), 1);

    let reset = section(&doc, "<function name='reset'", "</externals>");
    let externals = section(reset, "<externals>", "</externals>");
    assert_eq!(externals.matches(counter).count(), 1);
    assert_eq!(externals.matches("name='sum' scope='global'").count(), 1);
    assert!(reset.contains("<function name='sum' id='4' />"));
}

#[test]
fn test_section_order() {
    let doc = serialize(&linked_list_unit(), b"struct node;\n");
    let raw = doc.find("<raw-source>").unwrap();
    let types = doc.find("<referenced-types>").unwrap();
    let bodies = doc.find("<function-bodies>").unwrap();
    assert!(raw < types && types < bodies);
    assert_well_formed(&doc);
    assert!(doc.ends_with("</function-bodies>\n</lh-translation-unit>\n"));
}

#[test]
fn test_if_else_targets() {
    let mut b = UnitBuilder::new("abs.c", SourceLanguage::C);
    let abs = b.function_decl("abs", TypeNode::function(int(), vec![int(), TypeNode::void()]));
    let mut f = b.function(abs);
    let x = f.param("x", int());
    let result = f.result(int());

    f.create_block(2);
    f.push(Statement::branch(Expression::param(x), Operator::Lt, Expression::int(int(), 0))).unwrap();
    f.edge(3, EdgeFlags::TRUE_VALUE).unwrap();
    f.edge(4, EdgeFlags::FALSE_VALUE).unwrap();

    f.create_block(3);
    f.push(Statement::assign_unary(Expression::result(result), Operator::Negate, Expression::param(x)))
        .unwrap();
    f.edge(5, EdgeFlags::FALLTHRU).unwrap();

    f.create_block(4);
    f.push(Statement::copy(Expression::result(result), Expression::param(x))).unwrap();
    f.edge(5, EdgeFlags::FALLTHRU).unwrap();

    f.create_block(5);
    f.push(Statement::ret(Some(Expression::result(result)))).unwrap();
    f.edge(1, EdgeFlags::empty()).unwrap();
    f.finish();

    let doc = serialize(&b.finish(), b"");
    let branch = section(&doc, "<block id='2'>", "</block>");
    assert!(branch.contains("<then id='3' />"));
    assert!(branch.contains("<else id='4' />"));
    assert!(!branch.contains("<next"));

    let then_block = section(&doc, "<block id='3'>", "</block>");
    assert!(then_block.contains("<negate />\n"));
    assert!(then_block.contains("<next id='5' />"));

    let exit = section(&doc, "<block id='5'>", "</block>");
    assert!(!exit.contains("<next"));
    assert!(doc.contains("<body entrypoint='2'>"));
}

#[test]
fn test_raw_source_escaped() {
    let unit = UnitBuilder::new("e.c", SourceLanguage::Cxx).finish();
    let doc = serialize(&unit, b"if (a < b && c)\n\treturn 'x';\n");
    assert!(doc.contains("language='C++'"));
    assert!(doc.contains("<raw-source>if (a &lt; b &amp;&amp; c)\n\treturn &apos;x&apos;;\n</raw-source>"));
}

#[test]
fn test_fault_aborts_unit() {
    let mut b = UnitBuilder::new("bad.c", SourceLanguage::C);
    let f_decl = b.function_decl("f", TypeNode::function(TypeNode::void(), vec![TypeNode::void()]));
    let mut f = b.function(f_decl);
    f.create_block(2);
    f.push(Statement::copy(Expression::var(99), Expression::int(int(), 0))).unwrap();
    f.finish();

    let err = serialize_unit(&b.finish(), b"", "0.1.0").unwrap_err();
    assert!(matches!(err, LighthouseError::DanglingDecl { uid: 99 }));
}

#[test]
fn test_deliver_document() {
    let unit = linked_list_unit();
    let doc = serialize_unit(&unit, b"", "0.1.0").unwrap();
    let mut sink = MemorySink::new();
    deliver(&mut sink, &doc).unwrap();
    assert_eq!(sink.document(), doc.as_slice());
}

#[test]
fn test_control_characters_keep_document_well_formed() {
    let mut b = UnitBuilder::new("greet.c", SourceLanguage::C);
    let char_ptr = TypeNode::pointer_to(TypeNode::integer(8, false).named("char"));
    let greet = b.function_decl("greet", TypeNode::function(TypeNode::void(), vec![TypeNode::void()]));
    let mut f = b.function(greet);
    let msg = f.local(Some("msg"), char_ptr.clone());
    f.create_block(2);
    f.push(Statement::copy(Expression::var(msg), Expression::string(char_ptr, b"hi\0"))).unwrap();
    f.push(Statement::ret(None)).unwrap();
    f.edge(1, EdgeFlags::empty()).unwrap();
    f.finish();

    let doc = serialize(&b.finish(), b"int x;\x0c\nchar *s = \"a\\n\";\n");
    assert!(doc.contains("<string-literal>hi\\x00</string-literal>"));
    assert!(doc.contains("<raw-source>int x;\\x0c\nchar *s = &quot;a\\\\n&quot;;\n</raw-source>"));
    assert_well_formed(&doc);
}

#[test]
fn test_non_utf8_source_kept_per_byte() {
    let unit = UnitBuilder::new("latin1.c", SourceLanguage::C).finish();
    let doc = serialize(&unit, b"/* caf\xe9 */\nint caf\xc3\xa9;\n");
    assert!(doc.contains("<raw-source>/* caf&#233; */\nint caf&#233;;\n</raw-source>"));
    assert!(!doc.contains("&#65533;"));
    assert_well_formed(&doc);
}
