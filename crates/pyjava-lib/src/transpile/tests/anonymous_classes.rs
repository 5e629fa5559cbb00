use indoc::indoc;

use super::python;

#[test]
fn class_without_bases_is_named_after_object() {
    let input = indoc! {r#"
        class() { def say_hello(self) { print("Hello!"); } }
            .say_hello();
    "#};

    insta::assert_snapshot!(python(input), @r#"
    def __object0():
        class __object0:
            def say_hello(self):
                print("Hello!")
        return __object0
    __object0()().say_hello()
    "#);
}

#[test]
fn class_is_named_after_its_first_base() {
    let input = indoc! {r#"
        from abc import ABCMeta, abstractmethod;
        class Animal(metaclass=ABCMeta) {
            @abstractmethod def speak(self) { ... }
            @property
            @abstractmethod def name(self) -> str { ... }
        }
        mouse = class(Animal)("Mouse") {
            def __init__(self, name: str) {
                self._name = name;
            }

            def speak(self) { print("Squeak!"); }

            @property
            def name(self) -> str { return self._name; }
        };
        print(mouse.name, "says:");
        mouse.speak();
    "#};

    insta::assert_snapshot!(python(input), @r#"
    from abc import ABCMeta, abstractmethod
    class Animal(metaclass=ABCMeta):
        @abstractmethod
        def speak(self): ...
        @property
        @abstractmethod
        def name(self) -> str: ...
    def __Animal0():
        class __Animal0(Animal):
            def __init__(self, name: str):
                self._name = name
            def speak(self):
                print("Squeak!")
            @property
            def name(self) -> str:
                return self._name
        return __Animal0
    mouse = __Animal0()("Mouse")
    print(mouse.name, "says:")
    mouse.speak()
    "#);
}

#[test]
fn constructor_arguments_and_empty_body() {
    insta::assert_snapshot!(python(r#"class(Base)("arg"){ def m(self){ pass; } }"#), @r#"
    def __Base0():
        class __Base0(Base):
            def m(self):
                pass
        return __Base0
    __Base0()("arg")
    "#);

    insta::assert_snapshot!(python("x = class(mod.Base, Mixin)() {}\n"), @r"
    def __Base0():
        class __Base0(mod.Base, Mixin): pass
        return __Base0
    x = __Base0()()
    ");
}

#[test]
fn class_counter_is_shared_across_hints() {
    let input = indoc! {"
        a = class(Foo)() {}
        b = class(metaclass=Meta)() {}
    "};

    insta::assert_snapshot!(python(input), @r"
    def __Foo0():
        class __Foo0(Foo): pass
        return __Foo0
    a = __Foo0()()
    def __object1():
        class __object1(metaclass=Meta): pass
        return __object1
    b = __object1()()
    ");
}

#[test]
fn lambda_inside_class_body_is_declared_inside_the_factory() {
    let input = indoc! {"
        handler = class(Handler)() {
            on_event = lambda (e: Event) { log(e) }
        }
    "};

    insta::assert_snapshot!(python(input), @r"
    def __Handler0():
        class __Handler0(Handler):
            def __lambda0(e: Event):
                log(e)
            on_event = __lambda0
        return __Handler0
    handler = __Handler0()()
    ");
}
